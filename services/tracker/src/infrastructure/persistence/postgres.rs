//! PostgreSQL Tracker 仓储实现

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use errors::{AppError, AppResult};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use super::db_metrics::QueryTimer;
use super::rows::{TRACKER_COLUMNS, TRACKER_TABLE, TrackerRow};
use super::update_builder::{SqlValue, tracker_update};
use crate::domain::{NewTracker, RequestContext, Tracker, TrackerPatch, TrackerRepository};

/// 将 sqlx 错误转换为 AppError
fn map_sqlx_error(e: sqlx::Error) -> AppError {
    AppError::database(e.to_string())
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("tracker with id {} not found", id))
}

/// 数据库只保存到微秒
fn db_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn bind_value<'q>(
    query: QueryAs<'q, Postgres, TrackerRow, PgArguments>,
    value: SqlValue,
) -> QueryAs<'q, Postgres, TrackerRow, PgArguments> {
    match value {
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Timestamp(v) => query.bind(v),
        SqlValue::BigInt(v) => query.bind(v),
    }
}

pub struct PostgresTrackerRepository {
    pool: PgPool,
}

impl PostgresTrackerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackerRepository for PostgresTrackerRepository {
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Tracker>> {
        let timer = QueryTimer::start("list");
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC, id DESC",
            TRACKER_COLUMNS, TRACKER_TABLE
        );

        let result = ctx
            .run("list trackers", async {
                sqlx::query_as::<_, TrackerRow>(&sql)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)
            })
            .await;
        timer.observe(&result);

        Ok(result?.into_iter().map(Tracker::from).collect())
    }

    async fn create(&self, ctx: &RequestContext, new: NewTracker) -> AppResult<Tracker> {
        let timer = QueryTimer::start("create");
        let sql = format!(
            "INSERT INTO {} (task, start_time, end_time, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING {}",
            TRACKER_TABLE, TRACKER_COLUMNS
        );
        let now = db_now();

        let result = ctx
            .run("create tracker", async {
                sqlx::query_as::<_, TrackerRow>(&sql)
                    .bind(&new.task)
                    .bind(new.start_time)
                    .bind(new.end_time)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_sqlx_error)
            })
            .await;
        timer.observe(&result);

        let tracker = Tracker::from(result?);
        tracing::info!(id = tracker.id, "Tracker created");
        Ok(tracker)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> AppResult<Tracker> {
        let timer = QueryTimer::start("find_by_id");
        let sql = format!("SELECT {} FROM {} WHERE id = $1", TRACKER_COLUMNS, TRACKER_TABLE);

        let result = ctx
            .run("get tracker", async {
                sqlx::query_as::<_, TrackerRow>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?
                    .ok_or_else(|| not_found(id))
            })
            .await;
        timer.observe(&result);

        result.map(Tracker::from)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: TrackerPatch,
    ) -> AppResult<Tracker> {
        let statement = tracker_update(id, &patch, db_now())?;
        let timer = QueryTimer::start("update");

        let result = ctx
            .run("update tracker", async {
                let mut query = sqlx::query_as::<_, TrackerRow>(&statement.sql);
                for value in statement.args.iter().cloned() {
                    query = bind_value(query, value);
                }

                query
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?
                    .ok_or_else(|| not_found(id))
            })
            .await;
        timer.observe(&result);

        let tracker = Tracker::from(result?);
        tracing::info!(id, fields = ?patch.fields(), "Tracker updated");
        Ok(tracker)
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let timer = QueryTimer::start("delete");
        let sql = format!("DELETE FROM {} WHERE id = $1", TRACKER_TABLE);

        let result = ctx
            .run("delete tracker", async {
                let done = sqlx::query(&sql)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                if done.rows_affected() == 0 {
                    return Err(not_found(id));
                }
                Ok(())
            })
            .await;
        timer.observe(&result);

        result?;
        tracing::info!(id, "Tracker deleted");
        Ok(())
    }
}
