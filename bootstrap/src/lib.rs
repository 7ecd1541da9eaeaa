//! bootstrap - 统一服务启动骨架
//!
//! 服务和迁移工具复用的启动逻辑

mod infrastructure;
mod metrics;
mod runtime;
mod shutdown;
mod starter;

pub use infrastructure::*;
pub use metrics::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
