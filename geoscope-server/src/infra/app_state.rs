use std::{fmt, sync::Arc};

use geoscope_config::Config;
use geoscope_core::{AddressStore, JobRegistry};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<AddressStore>,
    /// Area-search jobs for the lifetime of the process.
    pub jobs: Arc<JobRegistry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("addresses", &self.store.len())
            .field("jobs", &self.jobs.len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<AddressStore>) -> Self {
        Self::with_registry(config, store, Arc::new(JobRegistry::new()))
    }

    pub fn with_registry(
        config: Arc<Config>,
        store: Arc<AddressStore>,
        jobs: Arc<JobRegistry>,
    ) -> Self {
        Self {
            config,
            store,
            jobs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &AddressStore {
        &self.store
    }

    pub fn jobs(&self) -> &JobRegistry {
        &self.jobs
    }
}
