//! Authentication endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{bearer_token, error_response};
use crate::mock_server::state::MockState;

/// Body of a login request.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<LoginBody>,
) -> Response {
    let mut state = state.write().await;

    match state.login(&body.email, &body.password) {
        Some(token) => Json(serde_json::json!({
            "token": token,
            "refreshToken": format!("refresh-{token}"),
            "user": { "email": body.email },
        }))
        .into_response(),
        None => error_response(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

/// POST /auth/logout
pub async fn logout(State(state): State<Arc<RwLock<MockState>>>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;

    match bearer_token(&headers) {
        Some(token) if state.logout(token) => {
            Json(serde_json::json!({ "success": true })).into_response()
        }
        _ => error_response(StatusCode::UNAUTHORIZED, "Authentication required"),
    }
}
