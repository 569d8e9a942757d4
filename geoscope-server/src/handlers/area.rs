use std::{convert::Infallible, sync::Arc};

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use geoscope_core::{
    JobHandle, JobView,
    api::{AreaAcceptedResponse, CitiesResponse, PendingResponse, routes},
    jobs::{AreaQuery, spawn_area_search},
};
use futures_util::stream;
use serde::Deserialize;
use tracing::{debug, error, info};

use super::params::{ApiQuery, parse_radius, required};
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Default, Deserialize)]
pub struct AreaParams {
    pub from: Option<String>,
    pub distance: Option<String>,
}

/// GET /area?from=..&distance=..
///
/// Registers a job and answers `202` with the URL to poll. The scan is
/// started by a `DeferredSearch` carried in the response body, so it only
/// begins once the body has been handed off.
pub async fn area_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<AreaParams>,
) -> AppResult<Response> {
    let origin = required(&params.from, "from")?;
    let radius_km = parse_radius(required(&params.distance, "distance")?, "distance")?;

    if !state.store().contains(origin) {
        return Err(AppError::not_found(format!("Address {origin} not found")));
    }

    let handle = state.jobs().create()?;
    let results_url = results_url(&state, &headers, handle);
    let body = match serde_json::to_vec(&AreaAcceptedResponse { results_url }) {
        Ok(body) => body,
        Err(err) => {
            if let Err(settle_err) = state.jobs().fail(handle, "area search aborted") {
                error!(%handle, error = %settle_err, "could not settle area job");
            }
            return Err(AppError::internal(format!("Failed to encode response: {err}")));
        }
    };

    info!(%handle, origin, radius_km, "area search accepted");
    debug!(jobs = ?state.jobs().stats(), "job registry");

    let deferred = DeferredSearch {
        state,
        handle,
        query: Some(AreaQuery::new(origin, radius_km)),
    };
    let stream = stream::unfold(
        (Some(Bytes::from(body)), deferred),
        |(chunk, deferred)| async move {
            chunk.map(|bytes| (Ok::<_, Infallible>(bytes), (None, deferred)))
        },
    );

    Ok((
        StatusCode::ACCEPTED,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Starts the area search when dropped, i.e. once the `202` body it rides in
/// has been drained or abandoned.
struct DeferredSearch {
    state: AppState,
    handle: JobHandle,
    query: Option<AreaQuery>,
}

impl Drop for DeferredSearch {
    fn drop(&mut self) {
        let Some(query) = self.query.take() else {
            return;
        };

        if tokio::runtime::Handle::try_current().is_err() {
            error!(handle = %self.handle, "no runtime to start area search");
            if let Err(err) = self.state.jobs().fail(self.handle, "area search aborted") {
                error!(handle = %self.handle, error = %err, "could not settle area job");
            }
            return;
        }

        spawn_area_search(
            Arc::clone(&self.state.store),
            Arc::clone(&self.state.jobs),
            self.handle,
            query,
        );
    }
}

/// GET /area-result/{handle}
pub async fn area_result_handler(
    State(state): State<AppState>,
    Path(raw_handle): Path<String>,
) -> AppResult<Response> {
    let not_found = || AppError::not_found("Area result not found");

    let handle: JobHandle = raw_handle.parse().map_err(|_| not_found())?;
    let view = state.jobs().get(handle).ok_or_else(not_found)?;
    debug!(%handle, status = ?view.status(), "area result polled");

    match view {
        JobView::Pending => {
            Ok((StatusCode::ACCEPTED, Json(PendingResponse {})).into_response())
        }
        JobView::Completed(cities) => {
            Ok(Json(CitiesResponse::borrowed(&cities)).into_response())
        }
        JobView::Failed(reason) => {
            Err(AppError::internal(format!("Area search failed: {reason}")))
        }
    }
}

/// Absolute polling URL for `handle`.
///
/// A configured public base URL wins; otherwise the request's own Host is
/// echoed back, with the scheme taken from `X-Forwarded-Proto` only when
/// proxy headers are trusted.
fn results_url(state: &AppState, headers: &HeaderMap, handle: JobHandle) -> String {
    let path = routes::area_result_path(handle);
    let server = &state.config().server;

    if let Some(base) = &server.public_base_url {
        return format!("{}{}", base.as_str().trim_end_matches('/'), path);
    }

    let scheme = server
        .trust_proxy_headers
        .then(|| {
            headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| v.eq_ignore_ascii_case("https") || v.eq_ignore_ascii_case("http"))
        })
        .flatten()
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| state.config().bind_addr());

    format!("{}://{}{}", scheme.to_ascii_lowercase(), host, path)
}
