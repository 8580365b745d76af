//! Request body and query parameter types.

mod auth;
mod params;

pub use auth::*;
pub use params::*;
