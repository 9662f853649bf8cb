use axum::http::{header::AUTHORIZATION, HeaderMap};
use zenith_config::ListingsConfig;

use crate::ApiError;

pub fn require_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("missing authorization header"))?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or("");
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(ApiError::unauthorized("invalid authorization scheme"));
    }

    let token = parts.next().unwrap_or("");
    if token.is_empty() {
        return Err(ApiError::unauthorized("missing bearer token"));
    }

    Ok(token.to_string())
}

/// Resolve optional `limit`/`offset` query parameters against the configured
/// page sizes. Out-of-range values are clamped rather than rejected.
pub fn clamp_paging(
    limit: Option<i64>,
    offset: Option<i64>,
    listings: &ListingsConfig,
) -> (i64, i64) {
    let default = i64::from(listings.default_page_size);
    let max = i64::from(listings.max_page_size);

    let limit = limit.unwrap_or(default).clamp(1, max);
    let offset = offset.unwrap_or(0).max(0);

    (limit, offset)
}
