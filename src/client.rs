//! Coach API HTTP client.
//!
//! Low-level client that owns the transport, injects credentials, and turns
//! failed responses into [`CoachError`]s. Resource-specific operations live
//! on the facades in [`crate::resources`].
//!
//! Every request runs through two explicit stages:
//!
//! 1. [`authorize`] attaches `Authorization: Bearer <key>` using the key
//!    held at dispatch time.
//! 2. [`check_response`] passes 2xx responses through and converts any
//!    other status into an error of the matching [`ErrorKind`](crate::ErrorKind).
//!
//! Transport failures with no response are classified by [`transport_error`].

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{CoachError, ErrorKind, Result};
use crate::path::{append_query, QueryParams};

const USER_AGENT: &str = concat!("coachapi/", env!("CARGO_PKG_VERSION"));

/// Per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters appended to the path.
    pub query: QueryParams,
    /// Headers for this request only. These win over default headers.
    pub headers: Vec<(String, String)>,
    /// Timeout for this request only.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Add a header for this request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Override the timeout for this request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Low-level Coach API client.
///
/// Handles authentication and HTTP requests. All verbs return the response
/// body decoded into the requested type, or a [`CoachError`].
///
/// This struct is cheaply cloneable; clones share the connection pool and
/// the API key, so [`set_api_key`](Self::set_api_key) on one clone is seen
/// by all of them.
///
/// # Example
///
/// ```no_run
/// use coachapi::{ClientConfig, CoachClient};
///
/// # async fn example() -> coachapi::Result<()> {
/// let client = CoachClient::new(ClientConfig::new("https://api.example.com"))?;
/// client.set_api_key("token");
/// let users: serde_json::Value = client.get("/users").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CoachClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: Arc<ArcSwapOption<String>>,
    timeout: Duration,
}

impl std::fmt::Debug for CoachClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("authenticated", &self.api_key.load().is_some())
            .finish_non_exhaustive()
    }
}

impl CoachClient {
    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a network error if the base URL or a configured header is
    /// invalid, or the transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let base_url = Url::parse(&base_url_str).map_err(|e| {
            CoachError::network(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;

        let headers = default_headers(&config.headers)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CoachError::network(format!("Failed to build HTTP client: {e}")).with_source(e)
            })?;

        let api_key = config.api_key.filter(|k| !k.is_empty()).map(Arc::new);

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: Arc::new(ArcSwapOption::new(api_key)),
            timeout: config.timeout,
        })
    }

    /// Create a client from `COACH_API_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`] and [`CoachClient::new`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the default request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replace the API key used by subsequent requests.
    ///
    /// An empty key clears authentication. Requests already dispatched keep
    /// the header they were sent with.
    pub fn set_api_key(&self, key: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            self.api_key.store(None);
        } else {
            self.api_key.store(Some(Arc::new(key)));
        }
    }

    /// Remove the API key; subsequent requests carry no `Authorization`.
    pub fn clear_api_key(&self) {
        self.api_key.store(None);
    }

    /// The API key currently in use, if any.
    pub fn api_key(&self) -> Option<String> {
        self.api_key.load_full().map(|k| k.as_str().to_owned())
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.dispatch(Method::GET, path, None, &RequestOptions::default())
            .await
    }

    /// Make a GET request with per-request options.
    #[tracing::instrument(skip(self, options))]
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        self.dispatch(Method::GET, path, None, options).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_with(path, body, &RequestOptions::default()).await
    }

    /// Make a POST request with JSON body and per-request options.
    #[tracing::instrument(skip(self, body, options))]
    pub async fn post_with<T, B>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.dispatch(Method::POST, path, Some(body), options).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put_with(path, body, &RequestOptions::default()).await
    }

    /// Make a PUT request with JSON body and per-request options.
    #[tracing::instrument(skip(self, body, options))]
    pub async fn put_with<T, B>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.dispatch(Method::PUT, path, Some(body), options).await
    }

    /// Make a PATCH request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_with(path, body, &RequestOptions::default()).await
    }

    /// Make a PATCH request with JSON body and per-request options.
    #[tracing::instrument(skip(self, body, options))]
    pub async fn patch_with<T, B>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.dispatch(Method::PATCH, path, Some(body), options).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.dispatch(Method::DELETE, path, None, &RequestOptions::default())
            .await
    }

    /// Make a DELETE request with per-request options.
    #[tracing::instrument(skip(self, options))]
    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        self.dispatch(Method::DELETE, path, None, options).await
    }

    /// Resolve a request path against the base URL.
    ///
    /// A leading `/` is relative to the base URL's path, not the host root.
    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CoachError::network(format!("Invalid request path '{path}': {e}")))
    }

    /// Perform one round trip.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<T> {
        let url = self.url_for(&append_query(path, &options.query))?;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        // Read the key now so a rotation before dispatch is honored.
        let api_key = self.api_key.load_full();
        let request = authorize(request, api_key.as_deref().map(String::as_str));

        let response = request.send().await.map_err(transport_error)?;
        let response = check_response(response).await?;
        decode(response).await
    }
}

/// Build the default header set: JSON content type, then configured extras.
fn default_headers(extra: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CoachError::network(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| CoachError::network(format!("Invalid value for header '{name}': {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| CoachError::network(format!("Failed to encode request body: {e}")))
}

/// Outbound stage: attach the bearer token when a key is set.
fn authorize(request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) if !key.is_empty() => request.bearer_auth(key),
        _ => request,
    }
}

/// Inbound stage: pass 2xx responses through, convert everything else.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        tracing::debug!(status = status.as_u16(), "request succeeded");
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok());

    let raw = match response.text().await {
        Ok(text) if !text.trim().is_empty() => {
            Some(serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text)))
        }
        _ => None,
    };

    let message = error_message(raw.as_ref(), status);
    let error = CoachError::from_status(status.as_u16(), message, raw).with_retry_after(retry_after);

    tracing::warn!(
        status = status.as_u16(),
        kind = %error.kind(),
        message = error.message(),
        "request failed"
    );

    Err(error)
}

/// Pick a human-readable message from an error body.
///
/// Prefers `message`, then `error`, then the status line.
fn error_message(body: Option<&Value>, status: StatusCode) -> String {
    let field = |name: &str| {
        body.and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    field("message")
        .or_else(|| field("error"))
        .map_or_else(
            || {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                )
            },
            ToString::to_string,
        )
}

/// Classify a failure where no usable response was received.
fn transport_error(err: reqwest::Error) -> CoachError {
    let error = if err.is_timeout() {
        CoachError::timeout(format!("Request timed out: {err}"))
    } else if err.is_builder() {
        CoachError::network(format!("Failed to build request: {err}"))
    } else {
        CoachError::network(format!("Network error: {err}"))
    };
    tracing::warn!(kind = %error.kind(), "no response received: {err}");
    error.with_source(err)
}

/// Decode a successful body. An empty body decodes as JSON `null`, and a
/// body that is not JSON is handed over as a string.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await.map_err(transport_error)?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(|e| decode_error(&e, &bytes));
    }

    match serde_json::from_slice(&bytes) {
        Ok(body) => Ok(body),
        Err(_) => {
            let text = Value::String(String::from_utf8_lossy(&bytes).into_owned());
            serde_json::from_value(text).map_err(|e| decode_error(&e, &bytes))
        }
    }
}

/// The response succeeded, so no status is attached.
fn decode_error(err: &serde_json::Error, bytes: &[u8]) -> CoachError {
    let raw = Value::String(String::from_utf8_lossy(bytes).into_owned());
    tracing::warn!("response body did not match the requested type: {err}");
    CoachError::new(ErrorKind::Generic, format!("Failed to parse response: {err}"))
        .with_raw_response(raw)
}
