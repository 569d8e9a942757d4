//! Configuration library for Geoscope.
//!
//! Settings are layered: built-in defaults, then an optional `geoscope.toml`,
//! then `.env`/process environment. The server binary applies its CLI
//! overrides on top of the loaded [`Config`].

pub mod loader;
pub mod models;
pub mod sources;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    AuthConfig, Config, ConfigMetadata, DatasetConfig, ServerConfig,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
