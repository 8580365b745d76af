//! Client (patient) endpoints.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::CoachClient;
use crate::error::Result;
use crate::models::{to_query, ClientListParams, DateRangeParams, ListParams};
use crate::path::{build_path, build_query};

const CLIENTS: &str = "/clients";
const CLIENT: &str = "/clients/{id}";
const STATS: &str = "/clients/{id}/stats";
const PROGRAMS: &str = "/clients/{id}/programs";
const PROGRAM: &str = "/clients/{id}/programs/{programId}";
const EVALUATIONS: &str = "/clients/{id}/evaluations";
const REPORTS: &str = "/clients/{id}/reports";

/// Clients of the practice, their assigned programs, evaluations and reports.
#[derive(Debug, Clone)]
pub struct ClientsApi {
    client: CoachClient,
}

impl ClientsApi {
    pub fn new(client: CoachClient) -> Self {
        Self { client }
    }

    /// `GET /clients`
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, params: &ClientListParams) -> Result<Value> {
        let path = format!("{CLIENTS}{}", build_query(&to_query(params)?));
        self.client.get(&path).await
    }

    /// `POST /clients`
    #[tracing::instrument(skip(self, data))]
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.client.post(CLIENTS, data).await
    }

    /// `GET /clients/{id}`
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.get(&build_path(CLIENT, [("id", id)])).await
    }

    /// `PUT /clients/{id}`
    #[tracing::instrument(skip(self, data))]
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> Result<Value> {
        self.client.put(&build_path(CLIENT, [("id", id)]), data).await
    }

    /// `DELETE /clients/{id}`
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.delete(&build_path(CLIENT, [("id", id)])).await
    }

    /// `GET /clients/{id}/stats`
    #[tracing::instrument(skip(self))]
    pub async fn stats(&self, id: &str) -> Result<Value> {
        self.client.get(&build_path(STATS, [("id", id)])).await
    }

    /// `GET /clients/{id}/programs`
    #[tracing::instrument(skip(self))]
    pub async fn programs(&self, id: &str, params: &ListParams) -> Result<Value> {
        let path = format!(
            "{}{}",
            build_path(PROGRAMS, [("id", id)]),
            build_query(&to_query(params)?)
        );
        self.client.get(&path).await
    }

    /// `POST /clients/{id}/programs/{programId}`
    #[tracing::instrument(skip(self))]
    pub async fn assign_program(&self, id: &str, program_id: &str) -> Result<Value> {
        let path = build_path(PROGRAM, [("id", id), ("programId", program_id)]);
        self.client.post(&path, &json!({})).await
    }

    /// `DELETE /clients/{id}/programs/{programId}`
    #[tracing::instrument(skip(self))]
    pub async fn unassign_program(&self, id: &str, program_id: &str) -> Result<Value> {
        let path = build_path(PROGRAM, [("id", id), ("programId", program_id)]);
        self.client.delete(&path).await
    }

    /// `GET /clients/{id}/evaluations`
    #[tracing::instrument(skip(self))]
    pub async fn evaluations(&self, id: &str, params: &DateRangeParams) -> Result<Value> {
        let path = format!(
            "{}{}",
            build_path(EVALUATIONS, [("id", id)]),
            build_query(&to_query(params)?)
        );
        self.client.get(&path).await
    }

    /// `GET /clients/{id}/reports`
    #[tracing::instrument(skip(self))]
    pub async fn reports(&self, id: &str, params: &DateRangeParams) -> Result<Value> {
        let path = format!(
            "{}{}",
            build_path(REPORTS, [("id", id)]),
            build_query(&to_query(params)?)
        );
        self.client.get(&path).await
    }
}
