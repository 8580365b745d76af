//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Coach API server.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

/// Shared state for the mock server.
///
/// Records are stored as raw JSON objects keyed by their `id`.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Login credentials, email to password.
    pub accounts: HashMap<String, String>,

    /// Bearer tokens accepted on protected routes.
    pub tokens: HashSet<String>,

    /// Clients indexed by ID.
    pub clients: BTreeMap<String, Value>,

    /// Programs indexed by ID.
    pub programs: BTreeMap<String, Value>,

    /// Program IDs assigned to each client ID.
    pub assignments: HashMap<String, Vec<String>>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an account that can log in.
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts.insert(email.to_string(), password.to_string());
        self
    }

    /// Accept a bearer token without logging in.
    pub fn with_token(mut self, token: &str) -> Self {
        self.tokens.insert(token.to_string());
        self
    }

    /// Add a client record. The record must carry a string `id`.
    pub fn with_client(mut self, client: Value) -> Self {
        if let Some(id) = client["id"].as_str() {
            self.clients.insert(id.to_string(), client);
        }
        self
    }

    /// Add a program record. The record must carry a string `id`.
    pub fn with_program(mut self, program: Value) -> Self {
        if let Some(id) = program["id"].as_str() {
            self.programs.insert(id.to_string(), program);
        }
        self
    }

    /// Check credentials and issue a new token.
    pub fn login(&mut self, email: &str, password: &str) -> Option<String> {
        if self.accounts.get(email).map(String::as_str) != Some(password) {
            return None;
        }
        let token = format!("token-{}", self.allocate_id());
        self.tokens.insert(token.clone());
        Some(token)
    }

    /// Revoke a token. Returns false if it was not active.
    pub fn logout(&mut self, token: &str) -> bool {
        self.tokens.remove(token)
    }

    /// Whether a bearer token is accepted.
    pub fn is_authorized(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| self.tokens.contains(t))
    }

    /// Store a new client, assigning its ID.
    pub fn insert_client(&mut self, mut client: Value) -> Value {
        let id = format!("client-{}", self.allocate_id());
        client["id"] = Value::String(id.clone());
        self.clients.insert(id, client.clone());
        client
    }

    /// Store a new program, assigning its ID.
    pub fn insert_program(&mut self, mut program: Value) -> Value {
        let id = format!("program-{}", self.allocate_id());
        program["id"] = Value::String(id.clone());
        self.programs.insert(id, program.clone());
        program
    }

    /// Merge fields into an existing client and return the result.
    pub fn update_client(&mut self, id: &str, changes: &Value) -> Option<&Value> {
        let client = self.clients.get_mut(id)?;
        if let (Some(target), Some(fields)) = (client.as_object_mut(), changes.as_object()) {
            for (key, value) in fields {
                if key != "id" {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        self.clients.get(id)
    }

    /// Remove a client and its assignments.
    pub fn remove_client(&mut self, id: &str) -> Option<Value> {
        self.assignments.remove(id);
        self.clients.remove(id)
    }

    /// Assign a program to a client. Returns false if either is unknown.
    pub fn assign(&mut self, client_id: &str, program_id: &str) -> bool {
        if !self.clients.contains_key(client_id) || !self.programs.contains_key(program_id) {
            return false;
        }
        let assigned = self.assignments.entry(client_id.to_string()).or_default();
        if !assigned.iter().any(|p| p == program_id) {
            assigned.push(program_id.to_string());
        }
        true
    }

    /// Remove a program assignment. Returns false if it did not exist.
    pub fn unassign(&mut self, client_id: &str, program_id: &str) -> bool {
        let Some(assigned) = self.assignments.get_mut(client_id) else {
            return false;
        };
        let before = assigned.len();
        assigned.retain(|p| p != program_id);
        assigned.len() != before
    }

    /// Programs assigned to a client.
    pub fn client_programs(&self, client_id: &str) -> Vec<&Value> {
        self.assignments
            .get(client_id)
            .map(|ids| ids.iter().filter_map(|id| self.programs.get(id)).collect())
            .unwrap_or_default()
    }

    /// List clients, optionally filtered by status and name search.
    pub fn list_clients(&self, status: Option<&str>, search: Option<&str>) -> Vec<&Value> {
        self.clients
            .values()
            .filter(|c| status.map_or(true, |s| c["status"].as_str() == Some(s)))
            .filter(|c| {
                search.map_or(true, |term| {
                    c["name"]
                        .as_str()
                        .is_some_and(|n| n.to_lowercase().contains(&term.to_lowercase()))
                })
            })
            .collect()
    }

    /// List programs, optionally restricted to templates.
    pub fn list_programs(&self, templates_only: bool) -> Vec<&Value> {
        self.programs
            .values()
            .filter(|p| !templates_only || p["isTemplate"].as_bool() == Some(true))
            .collect()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_issues_token() {
        let mut state = MockState::new().with_account("coach@example.com", "pw");

        assert!(state.login("coach@example.com", "wrong").is_none());
        let token = state.login("coach@example.com", "pw").unwrap();
        assert!(state.is_authorized(Some(&token)));
        assert!(!state.is_authorized(None));

        assert!(state.logout(&token));
        assert!(!state.is_authorized(Some(&token)));
    }

    #[test]
    fn test_insert_and_update_client() {
        let mut state = MockState::new();
        let client = state.insert_client(json!({"name": "Jane", "status": "active"}));
        let id = client["id"].as_str().unwrap().to_string();

        let updated = state
            .update_client(&id, &json!({"status": "discharged", "id": "hijack"}))
            .unwrap();
        assert_eq!(updated["status"], "discharged");
        assert_eq!(updated["id"], id.as_str());
    }

    #[test]
    fn test_assignments() {
        let mut state = MockState::new()
            .with_client(json!({"id": "c1", "name": "Jane"}))
            .with_program(json!({"id": "p1", "name": "Knee rehab"}));

        assert!(!state.assign("c1", "missing"));
        assert!(state.assign("c1", "p1"));
        assert!(state.assign("c1", "p1"));
        assert_eq!(state.client_programs("c1").len(), 1);

        assert!(state.unassign("c1", "p1"));
        assert!(!state.unassign("c1", "p1"));
        assert!(state.client_programs("c1").is_empty());
    }

    #[test]
    fn test_list_clients_with_filters() {
        let state = MockState::new()
            .with_client(json!({"id": "c1", "name": "Jane Doe", "status": "active"}))
            .with_client(json!({"id": "c2", "name": "John Roe", "status": "active"}))
            .with_client(json!({"id": "c3", "name": "Jane Poe", "status": "discharged"}));

        assert_eq!(state.list_clients(None, None).len(), 3);
        assert_eq!(state.list_clients(Some("active"), None).len(), 2);
        assert_eq!(state.list_clients(Some("active"), Some("jane")).len(), 1);
    }
}
