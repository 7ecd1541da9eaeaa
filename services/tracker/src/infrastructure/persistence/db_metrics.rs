//! 仓储操作计时

use std::time::Instant;

use metrics::{counter, histogram};

/// 慢查询阈值
const SLOW_QUERY_MS: u128 = 100;

/// 用于计时的守卫结构
pub struct QueryTimer {
    start: Instant,
    operation: &'static str,
}

impl QueryTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// 按结果记录耗时，失败时额外计数
    pub fn observe<T, E>(self, result: &Result<T, E>) {
        let elapsed = self.start.elapsed();
        let outcome = if result.is_ok() { "ok" } else { "error" };

        histogram!(
            "tracker_store_operation_duration_seconds",
            "operation" => self.operation,
            "outcome" => outcome
        )
        .record(elapsed.as_secs_f64());

        if result.is_err() {
            counter!("tracker_store_errors_total", "operation" => self.operation).increment(1);
        }

        if elapsed.as_millis() > SLOW_QUERY_MS {
            tracing::warn!(
                operation = self.operation,
                duration_ms = %elapsed.as_millis(),
                "Slow query detected"
            );
        }
    }
}
