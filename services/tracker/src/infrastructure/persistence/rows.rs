//! 数据库行结构

use chrono::{DateTime, Utc};

use crate::domain::Tracker;

pub const TRACKER_TABLE: &str = "tracker";

/// SELECT / RETURNING 使用的列，顺序与 [`TrackerRow`] 一致
pub const TRACKER_COLUMNS: &str = "id, task, start_time, end_time, created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackerRow {
    pub id: i64,
    pub task: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TrackerRow> for Tracker {
    fn from(row: TrackerRow) -> Self {
        Self {
            id: row.id,
            task: row.task,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
