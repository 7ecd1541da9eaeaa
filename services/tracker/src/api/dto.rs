//! 请求体

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// POST /trackers
///
/// 缺失或为 null 的字段按零值处理，交给校验报告。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTrackerRequest {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// PUT /trackers/{id}，`None` 表示不修改
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrackerRequest {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}
