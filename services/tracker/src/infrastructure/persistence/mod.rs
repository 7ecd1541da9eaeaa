//! PostgreSQL 持久化

mod db_metrics;
mod postgres;
mod rows;
mod schema;
mod update_builder;

pub use postgres::PostgresTrackerRepository;
pub use rows::{TRACKER_COLUMNS, TRACKER_TABLE, TrackerRow};
pub use schema::{CREATE_TRACKER_TABLE, ensure_schema};
pub use update_builder::{SqlValue, UpdateBuilder, UpdateStatement, tracker_update};
