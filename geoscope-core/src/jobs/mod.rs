//! Asynchronous area-search jobs.
//!
//! A job is created `Pending` by the request that asks for a radius search,
//! settled exactly once by the background runner, and read by any number of
//! polling requests afterwards. Jobs are never evicted.

pub mod area_search;
pub mod handle;
pub mod registry;
pub mod runner;

pub use area_search::{AreaQuery, area_search};
pub use handle::{HandleGenerator, JobHandle, UuidHandleGenerator};
pub use registry::{JobRegistry, JobStats, JobStatus, JobView};
pub use runner::spawn_area_search;
