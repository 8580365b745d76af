//! User endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::client::CoachClient;
use crate::error::Result;
use crate::models::{to_query, ListParams};
use crate::path::{build_path, build_query};

const USERS: &str = "/users";
const USER: &str = "/users/{id}";
const PROFILE: &str = "/users/profile";
const SETTINGS: &str = "/users/{id}/settings";
const PREFERENCES: &str = "/users/{id}/preferences";

/// User accounts, the current profile, and per-user settings.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: CoachClient,
}

impl UsersApi {
    pub fn new(client: CoachClient) -> Self {
        Self { client }
    }

    /// `GET /users`
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, params: &ListParams) -> Result<Value> {
        let path = format!("{USERS}{}", build_query(&to_query(params)?));
        self.client.get(&path).await
    }

    /// `POST /users`
    #[tracing::instrument(skip(self, user))]
    pub async fn create<B: Serialize + ?Sized>(&self, user: &B) -> Result<Value> {
        self.client.post(USERS, user).await
    }

    /// `GET /users/{id}`
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.get(&build_path(USER, [("id", id)])).await
    }

    /// `PUT /users/{id}`
    #[tracing::instrument(skip(self, user))]
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, user: &B) -> Result<Value> {
        self.client.put(&build_path(USER, [("id", id)]), user).await
    }

    /// `DELETE /users/{id}`
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.delete(&build_path(USER, [("id", id)])).await
    }

    /// `GET /users/profile`
    #[tracing::instrument(skip(self))]
    pub async fn profile(&self) -> Result<Value> {
        self.client.get(PROFILE).await
    }

    /// `PUT /users/profile`
    #[tracing::instrument(skip(self, profile))]
    pub async fn update_profile<B: Serialize + ?Sized>(&self, profile: &B) -> Result<Value> {
        self.client.put(PROFILE, profile).await
    }

    /// `GET /users/{id}/settings`
    #[tracing::instrument(skip(self))]
    pub async fn settings(&self, id: &str) -> Result<Value> {
        self.client.get(&build_path(SETTINGS, [("id", id)])).await
    }

    /// `PUT /users/{id}/settings`
    #[tracing::instrument(skip(self, settings))]
    pub async fn update_settings<B: Serialize + ?Sized>(
        &self,
        id: &str,
        settings: &B,
    ) -> Result<Value> {
        self.client
            .put(&build_path(SETTINGS, [("id", id)]), settings)
            .await
    }

    /// `GET /users/{id}/preferences`
    #[tracing::instrument(skip(self))]
    pub async fn preferences(&self, id: &str) -> Result<Value> {
        self.client.get(&build_path(PREFERENCES, [("id", id)])).await
    }

    /// `PUT /users/{id}/preferences`
    #[tracing::instrument(skip(self, preferences))]
    pub async fn update_preferences<B: Serialize + ?Sized>(
        &self,
        id: &str,
        preferences: &B,
    ) -> Result<Value> {
        self.client
            .put(&build_path(PREFERENCES, [("id", id)]), preferences)
            .await
    }
}
