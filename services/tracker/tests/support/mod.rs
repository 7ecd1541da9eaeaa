//! 测试辅助：内存仓储和可控的健康检查

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use common::{BaseHealthResult, HealthCheck};
use errors::{AppError, AppResult};
use tokio_util::sync::CancellationToken;

use tracker::api::{self, AppState};
use tracker::application::TrackerService;
use tracker::domain::{NewTracker, RequestContext, Tracker, TrackerPatch, TrackerRepository};

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Tracker>,
    last_stamp: Option<DateTime<Utc>>,
    fail_with: Option<AppError>,
    delay: Option<Duration>,
}

impl Inner {
    /// 单调递增的时钟，精度与数据库一致
    fn tick(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now().trunc_subsecs(6);
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + TimeDelta::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }
}

/// 行为与 PostgreSQL 实现一致的内存仓储
#[derive(Clone, Default)]
pub struct InMemoryTrackerRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTrackerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 之后的每次调用都返回该错误
    pub fn fail_with(&self, err: AppError) {
        self.inner.lock().unwrap().fail_with = Some(err);
    }

    /// 每次调用前等待
    pub fn delay(&self, delay: Duration) {
        self.inner.lock().unwrap().delay = Some(delay);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    async fn guard(&self) -> AppResult<()> {
        let (delay, failure) = {
            let inner = self.inner.lock().unwrap();
            (inner.delay, inner.fail_with.clone())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: i64) -> AppError {
        AppError::not_found(format!("tracker with id {} not found", id))
    }
}

#[async_trait]
impl TrackerRepository for InMemoryTrackerRepository {
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Tracker>> {
        ctx.run("list trackers", async {
            self.guard().await?;
            let inner = self.inner.lock().unwrap();
            let mut all: Vec<Tracker> = inner.rows.values().cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(all)
        })
        .await
    }

    async fn create(&self, ctx: &RequestContext, new: NewTracker) -> AppResult<Tracker> {
        ctx.run("create tracker", async {
            self.guard().await?;
            let mut inner = self.inner.lock().unwrap();
            inner.next_id += 1;
            let now = inner.tick();
            let tracker = Tracker {
                id: inner.next_id,
                task: new.task,
                start_time: new.start_time.trunc_subsecs(6),
                end_time: new.end_time.map(|t| t.trunc_subsecs(6)),
                created_at: now,
                updated_at: now,
            };
            inner.rows.insert(tracker.id, tracker.clone());
            Ok(tracker)
        })
        .await
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> AppResult<Tracker> {
        ctx.run("get tracker", async {
            self.guard().await?;
            let inner = self.inner.lock().unwrap();
            inner.rows.get(&id).cloned().ok_or_else(|| Self::not_found(id))
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: TrackerPatch,
    ) -> AppResult<Tracker> {
        ctx.run("update tracker", async {
            self.guard().await?;
            if patch.is_empty() {
                return Err(AppError::validation("no fields to update"));
            }
            let mut inner = self.inner.lock().unwrap();
            if !inner.rows.contains_key(&id) {
                return Err(Self::not_found(id));
            }
            let now = inner.tick();
            let row = inner.rows.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
            if let Some(task) = patch.task {
                row.task = task;
            }
            if let Some(start_time) = patch.start_time {
                row.start_time = start_time.trunc_subsecs(6);
            }
            if let Some(end_time) = patch.end_time {
                row.end_time = Some(end_time.trunc_subsecs(6));
            }
            row.updated_at = now;
            Ok(row.clone())
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        ctx.run("delete tracker", async {
            self.guard().await?;
            let mut inner = self.inner.lock().unwrap();
            inner
                .rows
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| Self::not_found(id))
        })
        .await
    }
}

/// 固定结果的健康检查
pub struct StaticHealthCheck {
    pub healthy: bool,
}

#[async_trait]
impl HealthCheck for StaticHealthCheck {
    async fn check(&self) -> BaseHealthResult {
        if self.healthy {
            BaseHealthResult::healthy(1)
        } else {
            BaseHealthResult::unhealthy("connection refused")
        }
    }

    fn component_name(&self) -> &'static str {
        "postgres"
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: InMemoryTrackerRepository,
    pub shutdown: CancellationToken,
}

pub fn test_app() -> TestApp {
    test_app_with(true, Duration::from_secs(5))
}

pub fn test_app_with(healthy: bool, request_timeout: Duration) -> TestApp {
    let repo = InMemoryTrackerRepository::new();
    let shutdown = CancellationToken::new();
    let service = Arc::new(TrackerService::new(Arc::new(repo.clone())));
    let state = AppState::new(
        service,
        Arc::new(StaticHealthCheck { healthy }),
        request_timeout,
        shutdown.clone(),
    );

    TestApp {
        router: api::router(state),
        repo,
        shutdown,
    }
}
