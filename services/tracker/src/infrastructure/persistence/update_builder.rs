//! 部分更新语句构建
//!
//! 每次 `set` 同时追加 SET 子句和参数，占位符编号始终等于参数位置；
//! 主键参数在 `finish` 时最后追加。

use chrono::{DateTime, Utc};
use errors::{AppError, AppResult};

use super::rows::{TRACKER_COLUMNS, TRACKER_TABLE};
use crate::domain::TrackerPatch;

/// 绑定参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Timestamp(DateTime<Utc>),
    BigInt(i64),
}

#[derive(Debug)]
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<String>,
    args: Vec<SqlValue>,
}

/// 生成的语句及按占位符顺序排列的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn set(&mut self, column: &'static str, value: SqlValue) -> &mut Self {
        self.args.push(value);
        self.assignments.push(format!("{} = ${}", column, self.args.len()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn finish(mut self, key_column: &str, key: SqlValue, returning: &str) -> UpdateStatement {
        self.args.push(key);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            self.table,
            self.assignments.join(", "),
            key_column,
            self.args.len(),
            returning
        );
        UpdateStatement {
            sql,
            args: self.args,
        }
    }
}

/// 根据 patch 构建 tracker 更新语句，`updated_at` 总是被刷新
pub fn tracker_update(
    id: i64,
    patch: &TrackerPatch,
    now: DateTime<Utc>,
) -> AppResult<UpdateStatement> {
    let mut builder = UpdateBuilder::new(TRACKER_TABLE);

    if let Some(task) = &patch.task {
        builder.set("task", SqlValue::Text(task.clone()));
    }
    if let Some(start_time) = patch.start_time {
        builder.set("start_time", SqlValue::Timestamp(start_time));
    }
    if let Some(end_time) = patch.end_time {
        builder.set("end_time", SqlValue::Timestamp(end_time));
    }

    if builder.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }

    builder.set("updated_at", SqlValue::Timestamp(now));
    Ok(builder.finish("id", SqlValue::BigInt(id), TRACKER_COLUMNS))
}
