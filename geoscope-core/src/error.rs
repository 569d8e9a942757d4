use std::path::PathBuf;

use thiserror::Error;

use crate::jobs::JobHandle;

/// Failure to build the [`AddressStore`](crate::AddressStore) from a dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read dataset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure inside a background area search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("origin address not found: {0}")]
    OriginNotFound(String),

    #[error("address {guid} has invalid coordinates")]
    InvalidCoordinates { guid: String },

    #[error("invalid search radius: {0}")]
    InvalidRadius(f64),
}

/// Contract violations reported by the [`JobRegistry`](crate::JobRegistry).
///
/// None of these are caused by client input; callers log them and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown job handle {0}")]
    UnknownHandle(JobHandle),

    #[error("job {0} has already been settled")]
    AlreadySettled(JobHandle),

    #[error("could not allocate a unique job handle after {attempts} attempts")]
    HandleSpaceExhausted { attempts: usize },
}
