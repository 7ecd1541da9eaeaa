//! common - 通用类型和工具库

pub mod health;

pub use health::*;
