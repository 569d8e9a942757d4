use axum::{Router, middleware, routing::get};
use geoscope_core::api::routes;
use tower_http::trace::TraceLayer;

use crate::{
    AppState, handlers,
    infra::middleware::bearer_auth_middleware,
};

/// All API routes, gated by the bearer token.
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(routes::CITIES_BY_TAG, get(handlers::cities_by_tag_handler))
        .route(routes::DISTANCE, get(handlers::distance_handler))
        .route(routes::AREA, get(handlers::area_handler))
        .route(routes::AREA_RESULT, get(handlers::area_result_handler))
        .route(routes::ALL_CITIES, get(handlers::all_cities_handler))
        .layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

/// Complete application router with request tracing.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_api_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
