use axum::{Json, extract::State};
use geoscope_core::{
    Address, AddressStore,
    api::{DistanceResponse, DistanceUnit},
    distance::{distance_between, round_km},
};
use serde::Deserialize;

use super::params::{ApiQuery, required};
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Default, Deserialize)]
pub struct DistanceParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /distance?from=..&to=..
pub async fn distance_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DistanceParams>,
) -> AppResult<Json<DistanceResponse>> {
    let from = lookup(state.store(), required(&params.from, "from")?)?;
    let to = lookup(state.store(), required(&params.to, "to")?)?;

    Ok(Json(DistanceResponse {
        from: from.clone(),
        to: to.clone(),
        distance: round_km(distance_between(from, to)),
        unit: DistanceUnit::Kilometers,
    }))
}

fn lookup<'a>(store: &'a AddressStore, guid: &str) -> AppResult<&'a Address> {
    store
        .get(guid)
        .ok_or_else(|| AppError::not_found(format!("Address {guid} not found")))
}
