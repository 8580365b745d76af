//! Resource facades.
//!
//! Each facade groups the endpoints of one resource and forwards to a
//! shared [`CoachClient`](crate::CoachClient). Facades only assemble URLs
//! and bodies; errors from the client propagate unchanged and payloads are
//! returned as raw JSON.

mod auth;
mod clients;
mod programs;
mod users;

pub use auth::AuthApi;
pub use clients::ClientsApi;
pub use programs::ProgramsApi;
pub use users::UsersApi;
