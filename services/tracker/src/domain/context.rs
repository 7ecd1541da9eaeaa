//! 请求上下文：截止时间与取消

use std::future::Future;
use std::time::Duration;

use errors::{AppError, AppResult};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 每个仓储操作都携带的上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Instant,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            cancel,
        }
    }

    /// 不关联外部取消信号的上下文
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, CancellationToken::new())
    }

    /// 在截止时间和取消信号的约束下执行 `fut`
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(AppError::cancelled(format!("{} cancelled", operation)));
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                Err(AppError::cancelled(format!("{} cancelled", operation)))
            }
            result = tokio::time::timeout_at(self.deadline, fut) => match result {
                Ok(inner) => inner,
                Err(_) => Err(AppError::deadline_exceeded(format!(
                    "{} exceeded its deadline",
                    operation
                ))),
            },
        }
    }
}
