//! Program endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{error_response, paginate, require_auth, ListQuery};
use crate::mock_server::state::MockState;

fn not_found(id: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, &format!("No program found with id: {id}"))
}

/// GET /programs
pub async fn list_programs(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    paginate(state.list_programs(false), &query)
}

/// GET /programs/templates
pub async fn list_templates(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    paginate(state.list_programs(true), &query)
}

/// POST /programs
pub async fn create_program(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    if body["name"].as_str().map_or(true, str::is_empty) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "message": "Validation failed",
                "errors": [{ "field": "name", "message": "is required" }],
            })),
        )
            .into_response();
    }

    let program = state.insert_program(body);
    (StatusCode::CREATED, Json(program)).into_response()
}

/// GET /programs/{id}
pub async fn get_program(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    match state.programs.get(&id) {
        Some(program) => Json(program.clone()).into_response(),
        None => not_found(&id),
    }
}

/// DELETE /programs/{id}
pub async fn delete_program(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    match state.programs.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&id),
    }
}

/// POST /programs/{id}/duplicate
pub async fn duplicate_program(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(overrides): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    let Some(original) = state.programs.get(&id).cloned() else {
        return not_found(&id);
    };

    let mut copy = original;
    let name = overrides["name"].as_str().map_or_else(
        || format!("{} (copy)", copy["name"].as_str().unwrap_or("Program")),
        ToString::to_string,
    );
    copy["name"] = Value::String(name);
    copy["isTemplate"] = Value::Bool(false);

    let program = state.insert_program(copy);
    (StatusCode::CREATED, Json(program)).into_response()
}
