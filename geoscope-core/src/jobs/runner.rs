use std::{sync::Arc, time::Instant};

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::{
    area_search::{AreaQuery, area_search},
    handle::JobHandle,
    registry::JobRegistry,
};
use crate::{address::Address, error::SearchError, store::AddressStore};

/// Runs an area search for an already created job and settles it.
///
/// The scan executes on the blocking pool; the returned task handle is only
/// useful to callers that want to wait, the HTTP path drops it. Success
/// completes the job, any failure (including a panicked scan) marks it failed
/// so pollers never wait on a job that cannot finish.
pub fn spawn_area_search(
    store: Arc<AddressStore>,
    registry: Arc<JobRegistry>,
    handle: JobHandle,
    query: AreaQuery,
) -> JoinHandle<()> {
    let origin = query.origin.clone();
    let radius_km = query.radius_km;
    spawn_job(registry, handle, origin, radius_km, move || {
        area_search(&store, &query)
    })
}

pub(crate) fn spawn_job<F>(
    registry: Arc<JobRegistry>,
    handle: JobHandle,
    origin: String,
    radius_km: f64,
    scan: F,
) -> JoinHandle<()>
where
    F: FnOnce() -> Result<Vec<Address>, SearchError> + Send + 'static,
{
    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = tokio::task::spawn_blocking(scan).await;

        let settled = match outcome {
            Ok(Ok(cities)) => {
                info!(
                    %handle,
                    %origin,
                    radius_km,
                    matches = cities.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "area search completed"
                );
                registry.complete(handle, cities)
            }
            Ok(Err(err)) => {
                warn!(%handle, %origin, error = %err, "area search failed");
                registry.fail(handle, err.to_string())
            }
            Err(join_err) => {
                error!(%handle, %origin, error = %join_err, "area search task aborted");
                registry.fail(handle, "area search aborted")
            }
        };

        if let Err(err) = settled {
            error!(%handle, error = %err, "could not settle area job");
        }
    })
}
