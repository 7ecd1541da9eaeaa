//! 领域层

mod context;
mod repository;
mod tracker;

pub use context::RequestContext;
pub use repository::TrackerRepository;
pub use tracker::*;
