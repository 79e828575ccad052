//! GitHub App authentication types.
//!
//! This module provides the identity and token types used to act as an
//! installed GitHub App:
//! - ID types (`AppId`, `InstallationId`)
//! - The application identity (`AppCredentials`: app ID + RSA private key)
//! - Token types (`JsonWebToken`, `InstallationToken`)
//!
//! All secret-bearing types redact their sensitive material in `Debug`
//! output.

pub mod jwt;

pub use jwt::JwtSigner;

use chrono::{DateTime, Duration, Utc};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// GitHub App identifier assigned during app registration.
///
/// Used as the `iss` claim of the app's signed JWT assertion.
///
/// # Examples
///
/// ```
/// use memebot_github::auth::AppId;
///
/// let app_id = AppId::new(224361);
/// assert_eq!(app_id.as_u64(), 224361);
/// assert_eq!(app_id.to_string(), "224361");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(u64);

impl AppId {
    /// Create a new GitHub App ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "app_id".to_string(),
                message: "must be a positive integer".to_string(),
            })?;
        Ok(Self::new(id))
    }
}

/// GitHub App installation identifier.
///
/// Assigned by GitHub when the app is installed on an account. Installation
/// tokens are scoped to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstallationId(u64);

impl InstallationId {
    /// Create a new installation ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for InstallationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// RSA private key for JWT signing.
///
/// Stores PEM-encoded PKCS#1 key material, validated on construction.
/// The key bytes are never exposed in `Debug` output.
#[derive(Clone)]
pub struct PrivateKey {
    key_data: Vec<u8>,
}

impl PrivateKey {
    /// Create a private key from a PEM-encoded string.
    ///
    /// GitHub issues app keys in PKCS#1 format (`BEGIN RSA PRIVATE KEY`);
    /// the key is parsed once here so a corrupt file fails at startup
    /// rather than on the first webhook delivery.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the PEM is empty, lacks BEGIN/END
    /// markers, or does not parse as an RSA private key.
    pub fn from_pem(pem: &str) -> Result<Self, ValidationError> {
        let pem = pem.trim();

        if pem.is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "private_key".to_string(),
                message: "PEM string cannot be empty".to_string(),
            });
        }

        if !pem.contains("-----BEGIN") || !pem.contains("-----END") {
            return Err(ValidationError::InvalidFormat {
                field: "private_key".to_string(),
                message: "Invalid PEM format: missing BEGIN/END markers".to_string(),
            });
        }

        RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| ValidationError::InvalidFormat {
            field: "private_key".to_string(),
            message: format!("Failed to parse RSA private key: {}", e),
        })?;

        Ok(Self {
            key_data: pem.as_bytes().to_vec(),
        })
    }

    /// Get the PEM bytes.
    pub fn key_data(&self) -> &[u8] {
        &self.key_data
    }
}

// Security: Don't expose key data in debug output
impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("key_data", &"<REDACTED>")
            .finish()
    }
}

/// The application identity: app ID plus signing key.
///
/// Loaded once at startup and shared read-only across request handlers.
#[derive(Clone)]
pub struct AppCredentials {
    app_id: AppId,
    private_key: PrivateKey,
}

impl AppCredentials {
    /// Create new app credentials.
    pub fn new(app_id: AppId, private_key: PrivateKey) -> Self {
        Self {
            app_id,
            private_key,
        }
    }

    /// Get the app ID.
    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    /// Get the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

impl std::fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("private_key", &"<REDACTED>")
            .finish()
    }
}

/// Signed JWT assertion for GitHub App authentication.
///
/// Presented as a bearer credential on app-level API calls. Maximum
/// lifetime is 10 minutes; a fresh assertion is minted per exchange.
///
/// The token string is never exposed in `Debug` output.
#[derive(Clone)]
pub struct JsonWebToken {
    token: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    app_id: AppId,
}

impl JsonWebToken {
    /// Create a new JWT token.
    pub fn new(token: String, app_id: AppId, expires_at: DateTime<Utc>) -> Self {
        let issued_at = Utc::now();
        Self {
            token,
            issued_at,
            expires_at,
            app_id,
        }
    }

    /// Get the encoded token string for the `Authorization: Bearer` header.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the app ID this token asserts.
    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    /// Get when this token was issued.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Get when this token expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check if the token is currently expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

// Security: Don't expose token in debug output
impl std::fmt::Debug for JsonWebToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonWebToken")
            .field("app_id", &self.app_id)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

/// Installation-scoped access token for GitHub API operations.
///
/// Short-lived bearer credential scoped to a single installation. Never
/// persisted; each webhook delivery performs its own exchange.
///
/// The token string is never exposed in `Debug` output.
#[derive(Clone)]
pub struct InstallationToken {
    token: String,
    installation_id: InstallationId,
    expires_at: DateTime<Utc>,
}

impl InstallationToken {
    /// Create a new installation token.
    pub fn new(
        token: String,
        installation_id: InstallationId,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            installation_id,
            expires_at,
        }
    }

    /// Get the token string for the `Authorization: Bearer` header.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the installation this token is scoped to.
    pub fn installation_id(&self) -> InstallationId {
        self.installation_id
    }

    /// Get when this token expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check if the token is currently expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check if the token will expire within the given margin.
    pub fn expires_soon(&self, margin: Duration) -> bool {
        Utc::now() + margin >= self.expires_at
    }
}

// Security: Redact token in debug output
impl std::fmt::Debug for InstallationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationToken")
            .field("installation_id", &self.installation_id)
            .field("expires_at", &self.expires_at)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

/// JWT claims for GitHub App authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Issuer (GitHub App ID)
    pub iss: AppId,
    /// Issued at (Unix timestamp, backdated slightly for clock skew)
    pub iat: i64,
    /// Expiration (Unix timestamp, max 10 minutes from issuance)
    pub exp: i64,
}

/// Installation record returned by the repository installation lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    /// The installation identifier used for the token exchange.
    pub id: InstallationId,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
