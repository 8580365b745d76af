//! Client endpoint handlers.

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
    error_response(StatusCode::NOT_FOUND, &format!("No client found with id: {id}"))
}

/// Field-level problems with a new client.
fn validate_client(body: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    if body["name"].as_str().map_or(true, str::is_empty) {
        errors.push("name is required".to_string());
    }
    if !body["email"].as_str().is_some_and(|e| e.contains('@')) {
        errors.push("email invalid".to_string());
    }
    errors
}

/// GET /clients
pub async fn list_clients(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    let clients = state.list_clients(query.status.as_deref(), query.search.as_deref());
    paginate(clients, &query)
}

/// POST /clients
pub async fn create_client(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    let errors = validate_client(&body);
    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "message": "Validation failed",
                "errors": errors,
            })),
        )
            .into_response();
    }

    let client = state.insert_client(body);
    (StatusCode::CREATED, Json(client)).into_response()
}

/// GET /clients/{id}
pub async fn get_client(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    match state.clients.get(&id) {
        Some(client) => Json(client.clone()).into_response(),
        None => not_found(&id),
    }
}

/// PUT /clients/{id}
pub async fn update_client(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(changes): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    match state.update_client(&id, &changes) {
        Some(client) => Json(client.clone()).into_response(),
        None => not_found(&id),
    }
}

/// DELETE /clients/{id}
pub async fn delete_client(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    match state.remove_client(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&id),
    }
}

/// GET /clients/{id}/programs
pub async fn list_client_programs(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    if !state.clients.contains_key(&id) {
        return not_found(&id);
    }
    paginate(state.client_programs(&id), &query)
}

/// POST /clients/{id}/programs/{programId}
pub async fn assign_program(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((id, program_id)): Path<(String, String)>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    if state.assign(&id, &program_id) {
        (
            StatusCode::CREATED,
            Json(serde_json::json!({ "clientId": id, "programId": program_id })),
        )
            .into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, "Client or program not found")
    }
}

/// DELETE /clients/{id}/programs/{programId}
pub async fn unassign_program(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((id, program_id)): Path<(String, String)>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = require_auth(&state, &headers) {
        return rejection;
    }

    if state.unassign(&id, &program_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, "Program is not assigned to this client")
    }
}
