// Comments API HTTP client.
// Handles base URL resolution, default headers, and status checking.

use std::time::Duration;

use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{LplError, Result};

/// Base URL the comments path is resolved against.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/posts/1/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("lpl-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(LplError::Transport)?;

        Self::with_client(client, base_url)
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Resolve an endpoint path against the base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint)
            .map_err(|e| LplError::Other(format!("bad endpoint {endpoint:?}: {e}")))
    }

    /// Make a GET request. Single attempt, no retry.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(LplError::Transport)?;

        check_response(response)
    }
}

/// Anything outside 2xx becomes a server error carrying the status.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(%status, url = %response.url(), "request rejected");
        Err(LplError::Server { status })
    }
}

/// Parse an absolute http(s) base URL and make sure it ends in `/`,
/// otherwise `Url::join` would replace its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| LplError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
