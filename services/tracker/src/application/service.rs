//! Tracker 应用服务
//!
//! 目前只做委托，业务规则将来加在这一层。

use std::sync::Arc;

use errors::AppResult;
use tracing::debug;

use crate::domain::{NewTracker, RequestContext, Tracker, TrackerPatch, TrackerRepository};

pub struct TrackerService {
    repo: Arc<dyn TrackerRepository>,
}

impl TrackerService {
    pub fn new(repo: Arc<dyn TrackerRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_trackers(&self, ctx: &RequestContext) -> AppResult<Vec<Tracker>> {
        self.repo.list(ctx).await
    }

    pub async fn create_tracker(
        &self,
        ctx: &RequestContext,
        new: NewTracker,
    ) -> AppResult<Tracker> {
        debug!(task = %new.task, "Creating tracker");
        self.repo.create(ctx, new).await
    }

    pub async fn get_tracker(&self, ctx: &RequestContext, id: i64) -> AppResult<Tracker> {
        self.repo.find_by_id(ctx, id).await
    }

    pub async fn update_tracker(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: TrackerPatch,
    ) -> AppResult<Tracker> {
        debug!(id, fields = ?patch.fields(), "Updating tracker");
        self.repo.update(ctx, id, patch).await
    }

    pub async fn delete_tracker(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        self.repo.delete(ctx, id).await
    }
}
