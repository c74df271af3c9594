//! Authenticated GitHub REST client
//!
//! [`GitHubClient`] owns the HTTP connection pool and the API base URL but no
//! credential. A [`GitHubSession`] binds one [`Credential`] snapshot to the
//! client; every upstream call made while serving a request goes through the
//! same session, so replacing the stored token mid-request has no effect on
//! calls already under way.

use std::fmt;
use std::sync::{Arc, RwLock};

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{GitHubError, GitHubResult};

/// Default upstream base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested by [`GitHubSession::get_all`]
pub const PER_PAGE: usize = 100;

/// Hard cap on the number of pages fetched by [`GitHubSession::get_all`]
pub const MAX_PAGES: u32 = 5;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = "DevIntel-AI";

/// A GitHub personal access token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token. Surrounding whitespace is dropped; an empty token is
    /// rejected.
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Process-wide token slot, written only by the settings endpoint
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<Credential>>>,
}

impl TokenStore {
    /// Create a store, optionally seeded with a token
    pub fn new(initial: Option<Credential>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replace the stored token
    pub fn set(&self, credential: Credential) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(credential);
    }

    /// Snapshot of the stored token
    pub fn current(&self) -> Option<Credential> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether any token is stored
    pub fn is_configured(&self) -> bool {
        self.current().is_some()
    }

    /// Pick the credential for one request: an explicit override wins over
    /// the stored token.
    pub fn resolve(&self, override_token: Option<&str>) -> GitHubResult<Credential> {
        override_token
            .and_then(|token| Credential::new(token))
            .or_else(|| self.current())
            .ok_or(GitHubError::NoToken)
    }
}

/// Result of a capped pagination walk
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// The page cap was hit while pages were still full, so GitHub may hold
    /// more items than were returned
    pub truncated: bool,
}

/// Shared HTTP client for the GitHub REST API
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client against the given API base URL
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL this client talks to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Bind a credential for the duration of one request
    pub fn session(&self, credential: Credential) -> GitHubSession {
        GitHubSession {
            client: self.clone(),
            credential,
        }
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// A [`GitHubClient`] bound to one credential
#[derive(Clone)]
pub struct GitHubSession {
    client: GitHubClient,
    credential: Credential,
}

impl GitHubSession {
    /// Issue an authenticated GET and return the parsed body.
    ///
    /// An empty 2xx body (GitHub answers 202 with nothing while it computes
    /// statistics) comes back as `Value::Null`.
    #[instrument(skip(self), fields(api = %self.client.api_url))]
    pub async fn get_json(&self, endpoint: &str) -> GitHubResult<Value> {
        let url = format!("{}{}", self.client.api_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.credential.expose()))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), endpoint, "GitHub returned an error");
            return Err(GitHubError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET and deserialize into `T`
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> GitHubResult<T> {
        let value = self.get_json(endpoint).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET a list endpoint; a non-array body yields an empty list
    pub async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> GitHubResult<Vec<T>> {
        match self.get_json(endpoint).await? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(GitHubError::from))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// Walk `per_page=100&page=N` from page 1, concatenating results.
    ///
    /// Stops on a short page, an empty or non-array page, or after
    /// [`MAX_PAGES`] pages.
    pub async fn get_all<T: DeserializeOwned>(&self, endpoint: &str) -> GitHubResult<Paginated<T>> {
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut truncated = false;

        for page in 1..=MAX_PAGES {
            let data = self
                .get_json(&format!("{endpoint}{sep}per_page={PER_PAGE}&page={page}"))
                .await?;
            let Value::Array(batch) = data else { break };
            if batch.is_empty() {
                break;
            }

            let len = batch.len();
            for item in batch {
                items.push(serde_json::from_value(item)?);
            }
            if len < PER_PAGE {
                break;
            }
            if page == MAX_PAGES {
                truncated = true;
                warn!(endpoint, pages = MAX_PAGES, "pagination cap reached, results truncated");
            }
        }

        Ok(Paginated { items, truncated })
    }
}
