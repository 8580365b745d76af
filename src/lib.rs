//! Coach API client library.
//!
//! A Rust library for the Coach platform REST API: authentication, users,
//! clients (patients) and exercise programs. Every call is a single HTTP
//! round trip; failures come back as one [`CoachError`] tagged with an
//! [`ErrorKind`] derived from the HTTP status.
//!
//! # Quick Start
//!
//! ```no_run
//! use coachapi::{CoachApi, ClientListParams, ErrorKind, ListParams};
//!
//! #[tokio::main]
//! async fn main() -> coachapi::Result<()> {
//!     // Create the API from environment variables
//!     let api = CoachApi::from_env()?;
//!
//!     // List the first page of clients
//!     let clients = api.clients().list(&ClientListParams::default()).await?;
//!     println!("Clients: {clients}");
//!
//!     // Discriminate failures by kind
//!     match api.users().get("missing").await {
//!         Err(e) if e.kind() == ErrorKind::NotFound => println!("no such user"),
//!         other => println!("{other:?}"),
//!     }
//!
//!     let programs = api.programs().templates(&Default::default()).await?;
//!     println!("Templates: {programs}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`build_path`] / [`build_query`] assemble request URLs.
//! - [`CoachClient`] performs the I/O, injects the bearer token, and maps
//!   failed responses to [`CoachError`].
//! - [`AuthApi`], [`UsersApi`], [`ClientsApi`] and [`ProgramsApi`] expose
//!   one method per endpoint.
//! - [`CoachApi`] bundles the facades over one shared client.
//!
//! # Configuration
//!
//! [`ClientConfig::from_env`] reads:
//!
//! - `COACH_API_URL` (optional) - Base URL (defaults to `http://localhost:3000/api`)
//! - `COACH_API_KEY` (optional) - Bearer token
//! - `COACH_API_TIMEOUT_MS` (optional) - Request timeout (defaults to 30000)

mod api;
mod client;
mod config;
mod error;
mod models;
mod path;
mod resources;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use api::CoachApi;
pub use client::{CoachClient, RequestOptions};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::{CoachError, ErrorKind, Result};
pub use path::{build_path, build_query, QueryParams, QueryValue};

// Re-export facades
pub use resources::{AuthApi, ClientsApi, ProgramsApi, UsersApi};

// Re-export models
pub use models::{
    // Auth bodies
    ChangePasswordRequest,
    LoginRequest,
    ResetPasswordRequest,
    // Query parameters
    ClientListParams,
    DateRangeParams,
    ListParams,
    ProgramListParams,
    SortOrder,
};
