use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier handed to clients for polling an area-search job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JobHandle(Uuid);

impl JobHandle {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for JobHandle {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Source of fresh job handles.
///
/// The registry re-draws when a generator hands out a handle that is still
/// registered, so implementations only need to be unlikely to repeat.
pub trait HandleGenerator: Send + Sync + fmt::Debug {
    fn next_handle(&self) -> JobHandle;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidHandleGenerator;

impl HandleGenerator for UuidHandleGenerator {
    fn next_handle(&self) -> JobHandle {
        JobHandle(Uuid::new_v4())
    }
}
