//! # Geoscope Server
//!
//! HTTP front end for the Geoscope address dataset.
//!
//! ## Endpoints
//!
//! Every route sits behind a shared-secret bearer token:
//!
//! - `GET /cities-by-tag` filters addresses by tag and active flag
//! - `GET /distance` measures the great-circle distance between two addresses
//! - `GET /area` starts an asynchronous radius search and answers `202` with
//!   a polling URL
//! - `GET /area-result/{handle}` resolves that URL once the search settles
//! - `GET /all-cities` streams the raw dataset file
//!
//! ## Architecture
//!
//! Built on Axum. The dataset is loaded into an immutable
//! [`AddressStore`](geoscope_core::AddressStore) at startup, and radius
//! searches are tracked in a [`JobRegistry`](geoscope_core::JobRegistry)
//! settled by background tasks.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use infra::errors::{AppError, AppResult};
pub use routes::create_app;
