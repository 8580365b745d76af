//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Value};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Email of the account in the default scenario.
    pub const COACH_EMAIL: &'static str = "coach@example.com";

    /// Password of the account in the default scenario.
    pub const COACH_PASSWORD: &'static str = "password123";

    /// Create a client record.
    pub fn client(id: &str, name: &str, email: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "status": "active",
            "tags": [],
        })
    }

    /// Create a program record.
    pub fn program(id: &str, name: &str, is_template: bool) -> Value {
        json!({
            "id": id,
            "name": name,
            "category": "rehabilitation",
            "isTemplate": is_template,
            "exercises": [],
        })
    }

    /// Create the default test scenario with common data.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A default test scenario with one account, clients and programs.
pub struct DefaultScenario {
    pub accounts: Vec<(String, String)>,
    pub clients: Vec<Value>,
    pub programs: Vec<Value>,
}

impl DefaultScenario {
    fn new() -> Self {
        Self {
            accounts: vec![(
                Fixtures::COACH_EMAIL.to_string(),
                Fixtures::COACH_PASSWORD.to_string(),
            )],
            clients: vec![
                Fixtures::client("client-a", "Jane Doe", "jane@example.com"),
                Fixtures::client("client-b", "John Roe", "john@example.com"),
            ],
            programs: vec![
                Fixtures::program("program-a", "ACL Phase 1", false),
                Fixtures::program("program-t", "Shoulder Mobility", true),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.accounts.len(), 1);
        assert_eq!(scenario.clients.len(), 2);
        assert!(scenario
            .programs
            .iter()
            .any(|p| p["isTemplate"].as_bool() == Some(true)));
    }
}
