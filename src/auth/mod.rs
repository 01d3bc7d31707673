//! Bearer-header authentication for the upload routes.
//!
//! By default only the presence of a well-formed `Authorization: Bearer <token>`
//! header is checked. When an admin token is configured the bearer value must
//! match it, compared in constant time.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer authentication layer function that takes the optional admin token as a parameter.
pub async fn bearer_auth_layer(
    admin_token: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = match bearer_token(request.headers()) {
        None => false,
        Some(token) => admin_token
            .as_deref()
            .map_or(true, |expected| constant_time_compare(token, expected)),
    };

    if !authorized {
        tracing::warn!(uri = %request.uri(), "Rejected upload without valid bearer credential");
        return AppError::Unauthorized("Unauthorized".to_string()).into_response();
    }

    next.run(request).await
}

/// Extract the token from a well-formed `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
