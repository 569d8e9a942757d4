use axum::{Json, extract::State};
use geoscope_core::api::CitiesResponse;
use serde::Deserialize;
use tracing::debug;

use super::params::{ApiQuery, parse_flag, required};
use crate::infra::{app_state::AppState, errors::AppResult};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesByTagParams {
    pub tag: Option<String>,
    pub is_active: Option<String>,
}

/// GET /cities-by-tag?tag=..&isActive=..
pub async fn cities_by_tag_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CitiesByTagParams>,
) -> AppResult<Json<CitiesResponse<'static>>> {
    let tag = required(&params.tag, "tag")?;
    let is_active = parse_flag(required(&params.is_active, "isActive")?, "isActive")?;

    let cities = state.store().filter_by_tag_and_status(tag, is_active);
    debug!(tag, is_active, matches = cities.len(), "cities by tag");

    Ok(Json(CitiesResponse::owned(cities)))
}
