//! Pelican API client.
//!
//! Low-level HTTP client that handles authentication, status classification
//! and body decoding. Higher-level operations are implemented via traits on
//! entity types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{PelicanError, Result};

/// Panel address used when no server is configured.
pub const DEFAULT_SERVER_URL: &str = "https://127.0.0.1:8080";

/// Per-request timeout. Every call blocks for at most this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("pelicanapi/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";

/// Low-level Pelican application API client.
///
/// Attaches the bearer token and JSON headers to every request, performs
/// exactly one attempt per call, and classifies the response. Entity-specific
/// operations are implemented via the `Get` and `List` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and are safe to use from concurrent tasks.
///
/// # Example
///
/// ```no_run
/// use pelicanapi::PelicanClient;
///
/// # fn example() -> pelicanapi::Result<()> {
/// // Resolve from PELICAN_SERVER / PELICAN_TOKEN
/// let client = PelicanClient::from_env()?;
///
/// // Or configure manually; an empty server falls back to the default
/// let client = PelicanClient::new("https://panel.example.com", "papp_token")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PelicanClient {
    http: Client,
    base_url: Arc<Url>,
    token: Arc<str>,
}

impl std::fmt::Debug for PelicanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PelicanClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PelicanClient {
    /// Create a client from `PELICAN_SERVER` and `PELICAN_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ProviderConfig::resolve(None, None)?)
    }

    /// Create a client from an already resolved provider configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is empty or the server is
    /// not a valid URL.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(&config.server, &config.token)
    }

    /// Create a new client for `server` authenticated with `token`.
    ///
    /// An empty `server` selects [`DEFAULT_SERVER_URL`]. No network call is
    /// made here.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `token` is empty or `server` is not
    /// a valid URL.
    pub fn new(server: &str, token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(PelicanError::Config("token must be provided".to_string()));
        }

        let server = if server.is_empty() {
            DEFAULT_SERVER_URL
        } else {
            server
        };

        // Ensure base URL ends with / so relative joins keep any path prefix
        let base_url_str = if server.ends_with('/') {
            server.to_string()
        } else {
            format!("{server}/")
        };

        let base_url = Url::parse(&base_url_str)
            .map_err(|e| PelicanError::Config(format!("invalid server '{server}': {e}")))?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PelicanError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: Arc::from(token),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the JSON body into `T`.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        let (url, body) = self.execute(self.request(Method::GET, url)).await?;
        Self::decode(&url, &body)
    }

    /// GET `path` with query parameters and decode the JSON body into `T`.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.base_url.join(path)?;
        let (url, body) = self
            .execute(self.request(Method::GET, url).query(query))
            .await?;
        Self::decode(&url, &body)
    }

    /// Send a request with an optional JSON body and decode the response.
    #[tracing::instrument(skip(self, body))]
    pub async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (url, text) = self.dispatch(method, path, body).await?;
        Self::decode(&url, &text)
    }

    /// Send a request whose response body is not needed.
    ///
    /// Status classification is identical to [`send`](Self::send); the body
    /// of a successful response is discarded without decoding.
    #[tracing::instrument(skip(self, body))]
    pub async fn send_no_content<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch(method, path, body).await.map(|_| ())
    }

    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(Url, String)>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base_url.join(path)?;
        let mut builder = self.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder).await
    }

    /// Start a request carrying the auth and JSON headers.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .bearer_auth(&self.token)
    }

    /// Perform exactly one request and return the final URL and raw body.
    async fn execute(&self, builder: RequestBuilder) -> Result<(Url, String)> {
        let response = builder.send().await.map_err(PelicanError::Http)?;
        let status = response.status();
        let url = response.url().clone();

        tracing::debug!(%url, status = status.as_u16(), "pelican response");

        if status.is_success() {
            let body = response.text().await.map_err(PelicanError::Http)?;
            return Ok((url, body));
        }

        // Keep the raw body for diagnostics even if it cannot be read fully
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {e}>"));

        Err(PelicanError::Status {
            status: status.as_u16(),
            body,
            url: url.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|source| PelicanError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
