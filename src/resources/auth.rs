//! Authentication endpoints.

use serde_json::{json, Value};

use crate::client::CoachClient;
use crate::error::Result;
use crate::models::{ChangePasswordRequest, LoginRequest, ResetPasswordRequest};

/// Login, logout, token refresh and password/email flows.
///
/// Logging in does not change the client's API key; pass the returned
/// token to [`CoachApi::set_api_key`](crate::CoachApi::set_api_key).
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: CoachClient,
}

impl AuthApi {
    pub fn new(client: CoachClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`
    #[tracing::instrument(skip(self))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Value> {
        self.client.post("/auth/login", credentials).await
    }

    /// `POST /auth/logout`
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<Value> {
        self.client.post("/auth/logout", &json!({})).await
    }

    /// `POST /auth/refresh`
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Value> {
        let body = json!({ "refreshToken": refresh_token });
        self.client.post("/auth/refresh", &body).await
    }

    /// `POST /auth/forgot-password`
    #[tracing::instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<Value> {
        self.client
            .post("/auth/forgot-password", &json!({ "email": email }))
            .await
    }

    /// `POST /auth/reset-password`
    #[tracing::instrument(skip_all)]
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Value> {
        self.client.post("/auth/reset-password", request).await
    }

    /// `POST /auth/change-password`
    #[tracing::instrument(skip_all)]
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Value> {
        self.client.post("/auth/change-password", request).await
    }

    /// `POST /auth/verify-email`
    #[tracing::instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<Value> {
        self.client
            .post("/auth/verify-email", &json!({ "token": token }))
            .await
    }

    /// `POST /auth/resend-verification`
    #[tracing::instrument(skip(self))]
    pub async fn resend_verification(&self, email: &str) -> Result<Value> {
        self.client
            .post("/auth/resend-verification", &json!({ "email": email }))
            .await
    }
}
