//! Bitbucket API client.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::{BumpError, Result};

/// Base URL of the Bitbucket Cloud 2.0 API.
pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Client for interacting with the Bitbucket API.
///
/// Authenticates every request with Basic auth using the account username
/// and an app password. Pagination is handled by the operations that need
/// it; rate limiting and retry are left to the caller.
#[derive(Clone)]
pub struct BitbucketClient {
    username: String,
    app_password: String,
    base_url: String,
    client: Client,
}

impl BitbucketClient {
    /// Create a new client with the given username and app password.
    pub fn new(username: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            app_password: app_password.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: Client::new(),
        }
    }

    /// Create a client against a custom base URL (self-hosted gateways,
    /// tests).
    pub fn with_base_url(
        username: impl Into<String>,
        app_password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let mut url = base_url.into();
        if url.ends_with('/') {
            url.pop();
        }
        Self {
            username: username.into(),
            app_password: app_password.into(),
            base_url: url,
            client: Client::new(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("repo-bump"));
        headers
    }

    /// Make a GET request and return the raw response.
    pub(crate) fn send_get(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .basic_auth(&self.username, Some(&self.app_password))
            .headers(self.headers())
            .send()
            .map_err(BumpError::from)
    }

    /// Make a GET request and deserialize a successful JSON response.
    pub(crate) fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send_get(url)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(self.status_error(status, &body));
        }

        response.json().map_err(|e| BumpError::Api {
            message: format!("Failed to parse response: {}", e),
        })
    }

    /// Map a non-success status to the error taxonomy.
    pub(crate) fn status_error(&self, status: StatusCode, body: &str) -> BumpError {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            BumpError::Auth {
                message: format!("API request rejected ({})", status),
            }
        } else {
            BumpError::Api {
                message: format!("API request failed ({}): {}", status, body),
            }
        }
    }
}
