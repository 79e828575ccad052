//! Error types for GitHub App operations.
//!
//! Each failure domain carries its own error enum so callers can map
//! outcomes to the right response surface: authentication failures must
//! short-circuit before any mutating API call, while API errors carry the
//! HTTP status needed to classify them.

use thiserror::Error;

/// Authentication and token exchange errors.
///
/// Covers everything between "we hold a private key" and "we hold a usable
/// installation token": key material problems, JWT signing, and the two
/// remote calls of the exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid private key format or data (non-retryable).
    #[error("Invalid private key: {message}")]
    InvalidPrivateKey { message: String },

    /// JWT generation failed (non-retryable).
    #[error("JWT generation failed: {message}")]
    JwtGenerationFailed { message: String },

    /// No installation exists for the given repository (non-retryable).
    #[error("No app installation found for {owner}/{repo}")]
    InstallationNotFound { owner: String, repo: String },

    /// GitHub API returned an error response during the exchange.
    #[error("GitHub API error: {status} - {message}")]
    GitHubApiError { status: u16, message: String },

    /// Failed to parse a GitHub API response body.
    #[error("Malformed GitHub API response: {message}")]
    MalformedResponse { message: String },

    /// Network connectivity or transport error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl AuthError {
    /// Check if this error represents a transient condition that may
    /// succeed if retried.
    ///
    /// Key problems and missing installations are permanent; server errors,
    /// rate limiting, and network failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::InvalidPrivateKey { .. } => false,
            Self::JwtGenerationFailed { .. } => false,
            Self::InstallationNotFound { .. } => false,
            Self::GitHubApiError { status, .. } => *status >= 500 || *status == 429,
            Self::MalformedResponse { .. } => false,
            Self::NetworkError(_) => true,
        }
    }
}

/// Errors during GitHub API operations performed with an installation token.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP error response from GitHub API.
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    /// The request was invalid (client error, e.g. validation failure).
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Authentication to GitHub API failed (bad or expired token).
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Authorization check failed (insufficient permissions).
    #[error("Authorization failed")]
    AuthorizationFailed,

    /// The requested resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// Failed to parse JSON response from GitHub API.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP client error (network, TLS, timeout).
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

impl ApiError {
    /// Check if this error represents a transient condition that may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidRequest { .. } => false,
            Self::AuthenticationFailed => false,
            Self::AuthorizationFailed => false,
            Self::NotFound => false,
            Self::JsonError(_) => false,
            Self::HttpClientError(_) => true,
        }
    }
}

/// Input validation errors.
///
/// Raised when parsing identifiers or key material from configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("Required field missing: {field}")]
    Required { field: String },

    /// A field has an invalid format.
    #[error("Invalid format for {field}: {message}")]
    InvalidFormat { field: String, message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
