//! Client configuration.

use std::env;
use std::time::Duration;

use crate::error::{CoachError, Result};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`CoachClient`](crate::CoachClient).
///
/// Every field is optional in the sense that [`ClientConfig::default`]
/// yields a usable development configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use coachapi::ClientConfig;
///
/// let config = ClientConfig::new("https://api.example.com/v1")
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(10))
///     .with_header("X-Client", "mobile");
/// assert_eq!(config.base_url, "https://api.example.com/v1");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL all request paths are resolved against.
    pub base_url: String,
    /// Bearer token sent as `Authorization` when present.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra default headers. These win over built-in defaults on collision.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `COACH_API_URL` - base URL (defaults to [`DEFAULT_API_URL`])
    /// - `COACH_API_KEY` - API key (optional)
    /// - `COACH_API_TIMEOUT_MS` - timeout in milliseconds (defaults to 30000)
    ///
    /// # Errors
    ///
    /// Returns a network error if `COACH_API_TIMEOUT_MS` is not a number.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("COACH_API_URL") {
            config.base_url = url;
        }

        config.api_key = env::var("COACH_API_KEY").ok().filter(|k| !k.is_empty());

        if let Ok(raw) = env::var("COACH_API_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                CoachError::network(format!("COACH_API_TIMEOUT_MS must be a number of milliseconds, got '{raw}'"))
            })?;
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
