//! Program endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::client::CoachClient;
use crate::error::Result;
use crate::models::{to_query, ProgramListParams};
use crate::path::{build_path, build_query};

const PROGRAMS: &str = "/programs";
const PROGRAM: &str = "/programs/{id}";
const EXERCISES: &str = "/programs/{id}/exercises";
const EXERCISE: &str = "/programs/{id}/exercises/{exerciseId}";
const DUPLICATE: &str = "/programs/{id}/duplicate";
const TEMPLATES: &str = "/programs/templates";

/// Exercise programs, their exercises, and program templates.
#[derive(Debug, Clone)]
pub struct ProgramsApi {
    client: CoachClient,
}

impl ProgramsApi {
    pub fn new(client: CoachClient) -> Self {
        Self { client }
    }

    /// `GET /programs`
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, params: &ProgramListParams) -> Result<Value> {
        let path = format!("{PROGRAMS}{}", build_query(&to_query(params)?));
        self.client.get(&path).await
    }

    /// `POST /programs`
    #[tracing::instrument(skip(self, program))]
    pub async fn create<B: Serialize + ?Sized>(&self, program: &B) -> Result<Value> {
        self.client.post(PROGRAMS, program).await
    }

    /// `GET /programs/{id}`
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.get(&build_path(PROGRAM, [("id", id)])).await
    }

    /// `PUT /programs/{id}`
    #[tracing::instrument(skip(self, program))]
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, program: &B) -> Result<Value> {
        self.client.put(&build_path(PROGRAM, [("id", id)]), program).await
    }

    /// `DELETE /programs/{id}`
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.delete(&build_path(PROGRAM, [("id", id)])).await
    }

    /// `GET /programs/{id}/exercises`
    #[tracing::instrument(skip(self))]
    pub async fn exercises(&self, id: &str) -> Result<Value> {
        self.client.get(&build_path(EXERCISES, [("id", id)])).await
    }

    /// `GET /programs/{id}/exercises/{exerciseId}`
    #[tracing::instrument(skip(self))]
    pub async fn exercise(&self, id: &str, exercise_id: &str) -> Result<Value> {
        let path = build_path(EXERCISE, [("id", id), ("exerciseId", exercise_id)]);
        self.client.get(&path).await
    }

    /// `POST /programs/{id}/exercises`
    #[tracing::instrument(skip(self, exercise))]
    pub async fn add_exercise<B: Serialize + ?Sized>(&self, id: &str, exercise: &B) -> Result<Value> {
        self.client
            .post(&build_path(EXERCISES, [("id", id)]), exercise)
            .await
    }

    /// `PUT /programs/{id}/exercises/{exerciseId}`
    #[tracing::instrument(skip(self, exercise))]
    pub async fn update_exercise<B: Serialize + ?Sized>(
        &self,
        id: &str,
        exercise_id: &str,
        exercise: &B,
    ) -> Result<Value> {
        let path = build_path(EXERCISE, [("id", id), ("exerciseId", exercise_id)]);
        self.client.put(&path, exercise).await
    }

    /// `DELETE /programs/{id}/exercises/{exerciseId}`
    #[tracing::instrument(skip(self))]
    pub async fn remove_exercise(&self, id: &str, exercise_id: &str) -> Result<Value> {
        let path = build_path(EXERCISE, [("id", id), ("exerciseId", exercise_id)]);
        self.client.delete(&path).await
    }

    /// `POST /programs/{id}/duplicate`
    ///
    /// `overrides` (e.g. a new name) are sent as the request body.
    #[tracing::instrument(skip(self, overrides))]
    pub async fn duplicate<B: Serialize + ?Sized>(&self, id: &str, overrides: &B) -> Result<Value> {
        self.client
            .post(&build_path(DUPLICATE, [("id", id)]), overrides)
            .await
    }

    /// `GET /programs/templates`
    #[tracing::instrument(skip(self))]
    pub async fn templates(&self, params: &ProgramListParams) -> Result<Value> {
        let path = format!("{TEMPLATES}{}", build_query(&to_query(params)?));
        self.client.get(&path).await
    }
}
