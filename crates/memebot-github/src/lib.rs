//! # Memebot GitHub
//!
//! GitHub App integration for the meme bot: App authentication, API client
//! abstractions, and webhook processing.
//!
//! This crate provides:
//! - GitHub App authentication with JWT and installation tokens
//! - API clients for installation discovery and issue comments
//! - Webhook signature validation and event payload types
//!
//! # Examples
//!
//! ## Validating Webhook Signatures
//!
//! ```rust
//! use memebot_github::webhook::{SignatureValidator, WebhookSecret};
//!
//! let validator = SignatureValidator::new(WebhookSecret::new("secret"));
//! let body = br#"{"action":"opened"}"#;
//!
//! if !validator.verify(body, "sha256=deadbeef") {
//!     // reject the delivery
//! }
//! ```
//!
//! ## Working with Tokens
//!
//! ```rust
//! use memebot_github::auth::{AppId, InstallationId, InstallationToken};
//! use chrono::{Duration, Utc};
//!
//! let app_id = AppId::new(224361);
//! let installation_id = InstallationId::new(789012);
//!
//! let token = InstallationToken::new(
//!     "ghs_token".to_string(),
//!     installation_id,
//!     Utc::now() + Duration::hours(1),
//! );
//!
//! if token.expires_soon(Duration::minutes(5)) {
//!     // exchange a fresh one
//! }
//! ```

// Public modules
pub mod auth;
pub mod client;
pub mod error;
pub mod webhook;

// Re-export commonly used types at crate root for convenience
pub use error::{ApiError, AuthError, ValidationError};

pub use auth::{
    AppCredentials, AppId, Installation, InstallationId, InstallationToken, JsonWebToken,
    JwtClaims, JwtSigner, PrivateKey,
};

pub use client::{AppClient, ClientConfig, Comment, CreateCommentRequest, InstallationApi};

pub use webhook::{PullRequestEvent, SignatureValidator, WebhookSecret};

#[cfg(test)]
mod test_keys;
