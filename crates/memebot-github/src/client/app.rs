//! App-level operations: installation lookup and token exchange.
//!
//! The exchange is two sequential calls, both authenticated with a fresh
//! RS256 app assertion:
//!
//! 1. `GET /repos/{owner}/{repo}/installation` resolves the installation
//!    for the repository the event came from.
//! 2. `POST /app/installations/{id}/access_tokens` issues a short-lived
//!    installation token scoped to that installation.
//!
//! A failed exchange always yields a typed [`AuthError`]; there is no
//! partially valid token state.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::auth::{Installation, InstallationId, InstallationToken, JsonWebToken, JwtSigner};
use crate::client::{ClientConfig, GITHUB_ACCEPT};
use crate::error::AuthError;

/// Token issuance response from GitHub.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Client for operations authenticated as the GitHub App itself.
///
/// Holds the JWT signer and a shared HTTP client handle. Safe to share
/// across concurrent request handlers; it has no mutable state.
pub struct AppClient {
    http: reqwest::Client,
    signer: JwtSigner,
    api_url: String,
}

impl AppClient {
    /// Create a new app client.
    ///
    /// # Arguments
    ///
    /// * `signer` - JWT signer holding the app credentials
    /// * `http` - Shared HTTP client (see [`ClientConfig::build_http_client`])
    /// * `config` - Client configuration (API base URL)
    pub fn new(signer: JwtSigner, http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            signer,
            api_url: config.github_api_url.clone(),
        }
    }

    /// Resolve the app installation for a repository.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InstallationNotFound` when the app is not
    /// installed on the repository (404), `AuthError::GitHubApiError` for
    /// other error statuses, and `AuthError::NetworkError` for transport
    /// failures.
    pub async fn repository_installation(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Installation, AuthError> {
        let jwt = self.signer.sign()?;
        let url = format!("{}/repos/{}/{}/installation", self.api_url, owner, repo);

        let response = self.get_as_app(&url, &jwt).await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(AuthError::InstallationNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }
        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), response).await);
        }

        let installation: Installation =
            response
                .json()
                .await
                .map_err(|e| AuthError::MalformedResponse {
                    message: format!("Failed to parse installation response: {}", e),
                })?;

        debug!(
            installation_id = %installation.id,
            owner, repo,
            "Resolved repository installation"
        );
        Ok(installation)
    }

    /// Create an installation access token.
    ///
    /// Mints a fresh app assertion and exchanges it for a token scoped to
    /// the given installation.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::GitHubApiError` when GitHub rejects the
    /// exchange, `AuthError::NetworkError` for transport failures, and
    /// `AuthError::MalformedResponse` if the response body cannot be
    /// parsed.
    pub async fn create_installation_token(
        &self,
        installation_id: InstallationId,
    ) -> Result<InstallationToken, AuthError> {
        let jwt = self.signer.sign()?;
        let url = format!(
            "{}/app/installations/{}/access_tokens",
            self.api_url,
            installation_id.as_u64()
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", jwt.token()))
            .header("Accept", GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), response).await);
        }

        let body: AccessTokenResponse =
            response
                .json()
                .await
                .map_err(|e| AuthError::MalformedResponse {
                    message: format!("Failed to parse access token response: {}", e),
                })?;

        debug!(%installation_id, expires_at = %body.expires_at, "Issued installation token");
        Ok(InstallationToken::new(
            body.token,
            installation_id,
            body.expires_at,
        ))
    }

    /// Obtain an installation token for a repository.
    ///
    /// Composes [`Self::repository_installation`] and
    /// [`Self::create_installation_token`]; this is the operation the
    /// webhook dispatcher calls per delivery. No caching: every call
    /// performs the full exchange.
    pub async fn installation_token_for(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<InstallationToken, AuthError> {
        let installation = self.repository_installation(owner, repo).await?;
        self.create_installation_token(installation.id).await
    }

    async fn get_as_app(
        &self,
        url: &str,
        jwt: &JsonWebToken,
    ) -> Result<reqwest::Response, AuthError> {
        self.http
            .get(url)
            .header("Authorization", format!("Bearer {}", jwt.token()))
            .header("Accept", GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))
    }
}

async fn error_from_response(status: u16, response: reqwest::Response) -> AuthError {
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());
    AuthError::GitHubApiError { status, message }
}

impl std::fmt::Debug for AppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppClient")
            .field("api_url", &self.api_url)
            .field("signer", &self.signer)
            .finish()
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
