//! # Geoscope Core
//!
//! Core library for the Geoscope lookup service: the in-memory address
//! store, great-circle distance math and the asynchronous area-search job
//! registry that the HTTP server polls.
//!
//! ## Architecture
//!
//! - [`store`]: read-only index of [`Address`] records, loaded once at startup
//! - [`distance`]: haversine distance in kilometers
//! - [`jobs`]: the job registry state machine plus the background runner that
//!   settles area-search jobs
//! - [`api`]: route constants and response payloads shared with clients
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use geoscope_core::{AddressStore, JobRegistry, jobs::{AreaQuery, spawn_area_search}};
//!
//! async fn radius_search(store: Arc<AddressStore>) {
//!     let registry = Arc::new(JobRegistry::new());
//!     let handle = registry.create().expect("handle");
//!     let query = AreaQuery::new("ed354fef-31d3-44a9-b92f-4a3bd7eb0408", 250.0);
//!     spawn_area_search(store, Arc::clone(&registry), handle, query);
//!     // poll registry.get(handle) until it settles
//! }
//! ```

pub mod address;
pub mod api;
pub mod distance;
pub mod error;
pub mod jobs;
pub mod store;

pub use address::{Address, Coordinates};
pub use error::{LoadError, RegistryError, SearchError};
pub use jobs::{JobHandle, JobRegistry, JobView};
pub use store::AddressStore;
