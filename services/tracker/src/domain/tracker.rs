//! Tracker 实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// task 去除首尾空白后的最大字符数
pub const MAX_TASK_CHARS: usize = 500;

/// `0001-01-01T00:00:00Z` 的 Unix 秒数，客户端用它表示"未设置"
const ZERO_INSTANT_UNIX_SECS: i64 = -62_135_596_800;

/// 时间跟踪记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: i64,
    pub task: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建意图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTracker {
    pub task: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

/// 部分更新意图，`None` 表示该字段不变
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerPatch {
    pub task: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TrackerPatch {
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.start_time.is_none() && self.end_time.is_none()
    }

    /// 本次更新涉及的字段名
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(3);
        if self.task.is_some() {
            fields.push("task");
        }
        if self.start_time.is_some() {
            fields.push("start_time");
        }
        if self.end_time.is_some() {
            fields.push("end_time");
        }
        fields
    }
}

/// 是否为零值时间
pub fn is_zero_instant(ts: &DateTime<Utc>) -> bool {
    ts.timestamp() == ZERO_INSTANT_UNIX_SECS && ts.timestamp_subsec_nanos() == 0
}
