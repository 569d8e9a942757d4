use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use constant_time_eq::constant_time_eq;
use tracing::warn;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Rejects requests without the configured bearer token.
///
/// No token at all is `401`; a token that does not match the secret is `403`.
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = extract_bearer_token(&request)
        .ok_or_else(|| AppError::unauthorized("Bearer token required"))?;

    let expected = state.config().auth.access_token.as_bytes();
    if !constant_time_eq(token.as_bytes(), expected) {
        warn!(path = %request.uri().path(), "rejected request with invalid access token");
        return Err(AppError::forbidden("Invalid access token"));
    }

    Ok(next.run(request).await)
}

/// Token part of `Authorization: Bearer <token>`; the scheme is matched
/// case-insensitively.
fn extract_bearer_token(request: &Request) -> Option<&str> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/cities-by-tag");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn extracts_token_with_any_scheme_casing() {
        let request = request_with(Some("bearer abc123"));
        assert_eq!(extract_bearer_token(&request), Some("abc123"));

        let request = request_with(Some("Bearer   padded  "));
        assert_eq!(extract_bearer_token(&request), Some("padded"));
    }

    #[test]
    fn missing_or_malformed_header_yields_none() {
        assert_eq!(extract_bearer_token(&request_with(None)), None);
        assert_eq!(extract_bearer_token(&request_with(Some("Bearer"))), None);
        assert_eq!(extract_bearer_token(&request_with(Some("Bearer  "))), None);
        assert_eq!(
            extract_bearer_token(&request_with(Some("Basic dXNlcjpwdw=="))),
            None
        );
    }
}
