//! Query-string extraction and validation shared by the handlers.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::infra::errors::{AppError, AppResult};

/// `Query` whose rejection is an [`AppError`], so malformed query strings
/// get the same JSON error body as every other `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Returns the value as sent, or a `400` naming the parameter when it is
/// missing or blank.
pub fn required<'a>(value: &'a Option<String>, name: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            AppError::bad_request(format!("Missing query parameter '{name}'"))
        })
}

pub fn parse_flag(raw: &str, name: &str) -> AppResult<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(AppError::bad_request(format!(
            "Query parameter '{name}' must be true or false"
        )))
    }
}

/// Radius in kilometers: finite and not negative.
pub fn parse_radius(raw: &str, name: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|km| km.is_finite() && *km >= 0.0)
        .ok_or_else(|| {
            AppError::bad_request(format!(
                "Query parameter '{name}' must be a non-negative number of kilometers"
            ))
        })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert_eq!(required(&Some(" x ".into()), "tag").unwrap(), " x ");
        assert_eq!(
            required(&None, "tag").unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
        assert!(required(&Some("   ".into()), "tag").is_err());
    }

    #[test]
    fn parse_flag_accepts_only_booleans() {
        assert!(parse_flag("TRUE", "isActive").unwrap());
        assert!(!parse_flag("false", "isActive").unwrap());
        assert!(parse_flag(" true ", "isActive").unwrap());
        assert!(parse_flag("1", "isActive").is_err());
        assert!(parse_flag("yes", "isActive").is_err());
    }

    #[test]
    fn parse_radius_rejects_negative_and_non_finite() {
        assert_eq!(parse_radius("250", "distance").unwrap(), 250.0);
        assert_eq!(parse_radius("0.5", "distance").unwrap(), 0.5);
        assert!(parse_radius("-1", "distance").is_err());
        assert!(parse_radius("NaN", "distance").is_err());
        assert!(parse_radius("inf", "distance").is_err());
        assert!(parse_radius("far", "distance").is_err());
    }
}
