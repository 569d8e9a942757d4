use std::sync::Arc;

use anyhow::Context;
use geoscope_config::Config;
use geoscope_core::AddressStore;
use tracing::info;

use crate::infra::app_state::AppState;

/// Loads the dataset and wires the shared state. A dataset that cannot be
/// read or parsed aborts startup.
pub async fn bootstrap_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    let path = config.dataset.path.clone();
    let store = AddressStore::load(&path).await.with_context(|| {
        format!("failed to load address dataset from {}", path.display())
    })?;

    if store.is_empty() {
        info!(path = %path.display(), "address dataset is empty");
    }

    Ok(AppState::new(config, Arc::new(store)))
}
