//! Mock Coach API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Coach
//! API for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server maintains state across requests:
//! logging in issues a token that protected routes then require, and
//! created clients and programs can be read back.
//!
//! # Example
//!
//! ```ignore
//! use coachapi::mock_server::MockServer;
//! use coachapi::{ClientConfig, CoachApi, LoginRequest};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let api = CoachApi::new(ClientConfig::new(server.url())).unwrap();
//!
//!     let session = api
//!         .auth()
//!         .login(&LoginRequest::new("coach@example.com", "password123"))
//!         .await
//!         .unwrap();
//!     api.set_api_key(session["token"].as_str().unwrap());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
