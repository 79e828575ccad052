//! Issue comment operations.
//!
//! A pull request shares its number with an issue, so commenting on a PR
//! goes through the issue comments endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::InstallationToken;
use crate::client::{ClientConfig, GITHUB_ACCEPT};
use crate::error::ApiError;

/// Comment on an issue or pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: u64,

    /// Comment body content (Markdown)
    pub body: String,

    /// User who created the comment
    pub user: CommentUser,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Comment URL
    pub html_url: String,
}

/// User associated with a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentUser {
    /// User login name
    pub login: String,

    /// User ID
    pub id: u64,
}

/// Request to create a comment.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    /// Comment body content (Markdown, required)
    pub body: String,
}

/// Client for repository operations authenticated with installation tokens.
///
/// Stateless apart from the shared HTTP handle; the token is supplied per
/// call because each webhook delivery carries its own freshly exchanged
/// token.
#[derive(Clone)]
pub struct InstallationApi {
    http: reqwest::Client,
    api_url: String,
}

impl InstallationApi {
    /// Create a new installation API client.
    ///
    /// # Arguments
    ///
    /// * `http` - Shared HTTP client (see [`ClientConfig::build_http_client`])
    /// * `config` - Client configuration (API base URL)
    pub fn new(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            api_url: config.github_api_url.clone(),
        }
    }

    /// Create a comment on an issue or pull request.
    ///
    /// # Arguments
    ///
    /// * `token` - Installation token scoped to the repository
    /// * `owner` - Repository owner login
    /// * `repo` - Repository name
    /// * `issue_number` - Issue or PR number
    /// * `body` - Markdown comment body
    ///
    /// # Errors
    ///
    /// Returns `ApiError` mapping GitHub's status codes: 401 →
    /// `AuthenticationFailed`, 403 → `AuthorizationFailed`, 404 →
    /// `NotFound`, 422 → `InvalidRequest`, anything else non-2xx →
    /// `HttpError`.
    pub async fn create_comment(
        &self,
        token: &InstallationToken,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<Comment, ApiError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url, owner, repo, issue_number
        );
        let request = CreateCommentRequest {
            body: body.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", token.token()))
            .header("Accept", GITHUB_ACCEPT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                422 => {
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Validation failed".to_string());
                    ApiError::InvalidRequest { message }
                }
                404 => ApiError::NotFound,
                403 => ApiError::AuthorizationFailed,
                401 => ApiError::AuthenticationFailed,
                _ => {
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    ApiError::HttpError {
                        status: status.as_u16(),
                        message,
                    }
                }
            });
        }

        let comment: Comment = response.json().await?;
        debug!(comment_id = comment.id, owner, repo, issue_number, "Created comment");
        Ok(comment)
    }
}

impl std::fmt::Debug for InstallationApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationApi")
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
