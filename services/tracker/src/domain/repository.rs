//! Tracker 仓储接口

use async_trait::async_trait;
use errors::AppResult;

use super::{NewTracker, RequestContext, Tracker, TrackerPatch};

/// Tracker 仓储接口
///
/// 不存在的 id 返回 `AppError::NotFound`，其余数据库错误返回 `AppError::Database`。
#[async_trait]
pub trait TrackerRepository: Send + Sync {
    /// 按 created_at 倒序列出全部记录
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Tracker>>;

    /// 新建记录，返回包含生成 id 和时间戳的完整实体
    async fn create(&self, ctx: &RequestContext, new: NewTracker) -> AppResult<Tracker>;

    /// 根据 ID 查找
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> AppResult<Tracker>;

    /// 部分更新，空 patch 返回 `AppError::Validation`
    async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: TrackerPatch,
    ) -> AppResult<Tracker>;

    /// 硬删除
    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()>;
}
