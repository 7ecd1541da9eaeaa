//! adapter-postgres - PostgreSQL 适配器

mod connection;
mod health;
mod options;

pub use connection::*;
pub use health::*;
pub use options::*;
