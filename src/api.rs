//! Entry point bundling every resource facade over one client.

use crate::client::CoachClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resources::{AuthApi, ClientsApi, ProgramsApi, UsersApi};

/// Coach API entry point.
///
/// All facades share one [`CoachClient`], so rotating the key with
/// [`set_api_key`](Self::set_api_key) applies to every facade.
///
/// # Example
///
/// ```no_run
/// use coachapi::{ClientConfig, CoachApi, ListParams, LoginRequest};
///
/// # async fn example() -> coachapi::Result<()> {
/// let api = CoachApi::new(ClientConfig::new("https://api.example.com"))?;
///
/// let session = api.auth().login(&LoginRequest::new("coach@example.com", "pw")).await?;
/// if let Some(token) = session["token"].as_str() {
///     api.set_api_key(token);
/// }
///
/// let users = api.users().list(&ListParams::for_page(1, 20)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CoachApi {
    client: CoachClient,
    auth: AuthApi,
    users: UsersApi,
    clients: ClientsApi,
    programs: ProgramsApi,
}

impl CoachApi {
    /// Build the client and facades from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a network error if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(CoachClient::new(config)?))
    }

    /// Build from `COACH_API_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Wrap an existing client.
    pub fn with_client(client: CoachClient) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            users: UsersApi::new(client.clone()),
            clients: ClientsApi::new(client.clone()),
            programs: ProgramsApi::new(client.clone()),
            client,
        }
    }

    /// Login, logout, token refresh and password flows.
    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    /// User accounts, profile, settings and preferences.
    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    /// Coaching clients, their programs, evaluations and reports.
    pub fn clients(&self) -> &ClientsApi {
        &self.clients
    }

    /// Programs, their exercises and templates.
    pub fn programs(&self) -> &ProgramsApi {
        &self.programs
    }

    /// The underlying HTTP client, for endpoints without a facade method.
    pub fn http(&self) -> &CoachClient {
        &self.client
    }

    /// Replace the API key for all subsequent requests. An empty key
    /// clears authentication.
    pub fn set_api_key(&self, key: impl Into<String>) {
        self.client.set_api_key(key);
    }
}
