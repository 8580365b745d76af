//! HTTP request handlers for the mock server.

pub mod auth;
pub mod clients;
pub mod programs;

pub use auth::*;
pub use clients::*;
pub use programs::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::mock_server::state::MockState;

/// Query parameters accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Extract the bearer token from request headers.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Reject requests without an accepted bearer token.
pub(crate) fn require_auth(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    if state.is_authorized(bearer_token(headers)) {
        Ok(())
    } else {
        Err(error_response(StatusCode::UNAUTHORIZED, "Authentication required"))
    }
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "message": message }))).into_response()
}

/// Apply page/limit to a list and wrap it in the list envelope.
pub(crate) fn paginate(items: Vec<&serde_json::Value>, query: &ListQuery) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20);
    let total = items.len();

    let start = (page as usize - 1).saturating_mul(limit as usize);
    let data: Vec<_> = items.into_iter().skip(start).take(limit as usize).collect();

    Json(serde_json::json!({
        "data": data,
        "total": total,
        "page": page,
        "limit": limit,
    }))
    .into_response()
}
