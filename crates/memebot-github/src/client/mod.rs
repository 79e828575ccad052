//! GitHub API clients.
//!
//! Two clients share one HTTP connection pool:
//! - [`AppClient`] authenticates as the app itself (JWT bearer) and
//!   performs the installation token exchange.
//! - [`InstallationApi`] performs repository operations with an
//!   installation token obtained from the exchange.

mod app;
mod issue;

pub use app::AppClient;
pub use issue::{Comment, CommentUser, CreateCommentRequest, InstallationApi};

use std::time::Duration;

use crate::error::ApiError;

/// Media type GitHub expects on REST API requests.
pub(crate) const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Configuration for GitHub API client behavior.
///
/// # Examples
///
/// ```
/// use memebot_github::client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("memebot/0.1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string for API requests (required by GitHub)
    pub user_agent: String,
    /// Request timeout; every outbound call is bounded by this
    pub timeout: Duration,
    /// GitHub API base URL
    pub github_api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "memebot/0.1.0".to_string(),
            timeout: Duration::from_secs(30),
            github_api_url: "https://api.github.com".to_string(),
        }
    }
}

impl ClientConfig {
    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the GitHub API base URL.
    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = url.into();
        self
    }

    /// Build the shared HTTP client described by this configuration.
    ///
    /// The returned `reqwest::Client` is an `Arc` around a connection
    /// pool internally; clone it freely across the clients that need it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HttpClientError` if the underlying client
    /// cannot be constructed.
    pub fn build_http_client(&self) -> Result<reqwest::Client, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;
        Ok(client)
    }
}
