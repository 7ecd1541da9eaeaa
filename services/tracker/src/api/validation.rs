//! 请求校验

use chrono::{DateTime, Utc};

use super::dto::{CreateTrackerRequest, UpdateTrackerRequest};
use crate::domain::{MAX_TASK_CHARS, NewTracker, TrackerPatch, is_zero_instant};

const END_BEFORE_START: &str = "end_time must not be before start_time";

fn check_task(task: &str, empty_message: &str, errors: &mut Vec<String>) {
    let trimmed = task.trim();
    if task.is_empty() {
        errors.push(empty_message.to_string());
    } else if trimmed.is_empty() {
        errors.push("task cannot contain only whitespace".to_string());
    } else if trimmed.chars().count() > MAX_TASK_CHARS {
        errors.push(format!("task cannot exceed {} characters", MAX_TASK_CHARS));
    }
}

fn non_zero(ts: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    ts.filter(|t| !is_zero_instant(t))
}

/// 校验创建请求，返回全部违规信息
pub fn validate_create(req: CreateTrackerRequest) -> Result<NewTracker, Vec<String>> {
    let mut errors = Vec::new();
    let task = req.task.unwrap_or_default();

    check_task(&task, "task is required and cannot be empty", &mut errors);

    let start_time = non_zero(req.start_time);
    // 零值 end_time 视为未提供
    let end_time = non_zero(req.end_time);

    match start_time {
        None => errors.push("start_time is required".to_string()),
        Some(start) => {
            if end_time.is_some_and(|end| end < start) {
                errors.push(END_BEFORE_START.to_string());
            }
        }
    }

    match start_time {
        Some(start_time) if errors.is_empty() => Ok(NewTracker {
            task,
            start_time,
            end_time,
        }),
        _ => Err(errors),
    }
}

/// 校验更新请求
///
/// 只提供 end_time 时不与已存储的 start_time 比较。
pub fn validate_update(req: UpdateTrackerRequest) -> Result<TrackerPatch, Vec<String>> {
    if req.task.is_none() && req.start_time.is_none() && req.end_time.is_none() {
        return Err(vec![
            "at least one field (task, start_time, or end_time) must be provided for update"
                .to_string(),
        ]);
    }

    let mut errors = Vec::new();

    if let Some(task) = &req.task {
        check_task(task, "task cannot be empty", &mut errors);
    }
    if req.start_time.as_ref().is_some_and(is_zero_instant) {
        errors.push("start_time cannot be zero".to_string());
    }
    if req.end_time.as_ref().is_some_and(is_zero_instant) {
        errors.push("end_time cannot be zero".to_string());
    }
    if let (Some(start), Some(end)) = (non_zero(req.start_time), non_zero(req.end_time)) {
        if end < start {
            errors.push(END_BEFORE_START.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TrackerPatch {
        task: req.task,
        start_time: req.start_time,
        end_time: req.end_time,
    })
}

/// 解析路径中的 id
pub fn parse_id(raw: &str) -> Result<i64, &'static str> {
    if raw.is_empty() {
        return Err("id parameter is required");
    }
    let id: i64 = raw.parse().map_err(|_| "id must be a valid integer")?;
    if id <= 0 {
        return Err("id must be a positive integer");
    }
    Ok(id)
}
