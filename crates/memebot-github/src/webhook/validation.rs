//! Webhook signature validation.
//!
//! GitHub signs every delivery by computing HMAC-SHA256 over the raw body
//! with the webhook secret and sending `sha256=<hex>` in the
//! `X-Hub-Signature-256` header. Validation recomputes the digest over the
//! exact body bytes (before any JSON parsing) and compares in constant
//! time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Webhook secret shared with GitHub.
///
/// Loaded once at startup, immutable for the process lifetime. Never
/// exposed in `Debug` output.
#[derive(Clone)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Create a new webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WebhookSecret(<REDACTED>)")
    }
}

/// Validates GitHub webhook signatures using HMAC-SHA256.
///
/// # Security
///
/// - Constant-time digest comparison (`subtle`) to prevent timing attacks
/// - Never logs the secret or signature values
/// - Malformed input is a mismatch, never a panic
///
/// # Examples
///
/// ```
/// use memebot_github::webhook::{SignatureValidator, WebhookSecret};
///
/// let validator = SignatureValidator::new(WebhookSecret::new("my-secret"));
/// let body = br#"{"action":"opened"}"#;
///
/// // A forged or malformed signature never verifies.
/// assert!(!validator.verify(body, "sha256=0000"));
/// assert!(!validator.verify(body, "not-a-signature"));
/// ```
#[derive(Clone)]
pub struct SignatureValidator {
    secret: WebhookSecret,
}

impl SignatureValidator {
    /// Create a new signature validator.
    pub fn new(secret: WebhookSecret) -> Self {
        Self { secret }
    }

    /// Verify a delivery signature against the raw payload bytes.
    ///
    /// Returns `true` only when `signature` is exactly
    /// `sha256=<hex digest>` and the digest matches HMAC-SHA256 of
    /// `payload` under the configured secret. Any other input shape
    /// (missing or wrong prefix, invalid hex, truncated digest) is a
    /// mismatch. An absent header is the caller's concern; this function
    /// only judges a header value it was given.
    ///
    /// Pure over its inputs: an empty payload and even an empty secret
    /// still produce a digest and compare normally.
    pub fn verify(&self, payload: &[u8], signature: &str) -> bool {
        let Some(candidate) = Self::parse_signature(signature) else {
            return false;
        };

        let expected = self.compute_hmac(payload);

        constant_time_eq(&candidate, &expected)
    }

    /// Extract the digest bytes from GitHub's `sha256=<hex>` format.
    ///
    /// `None` for anything that is not the anchored, case-sensitive
    /// prefix followed by valid hex.
    fn parse_signature(signature: &str) -> Option<Vec<u8>> {
        let hex_digest = signature.strip_prefix(SIGNATURE_PREFIX)?;
        hex::decode(hex_digest).ok()
    }

    /// Compute HMAC-SHA256 over the payload with the configured secret.
    fn compute_hmac(&self, payload: &[u8]) -> Vec<u8> {
        // HMAC-SHA256 accepts keys of any length, including empty.
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time comparison of two digests.
///
/// Length is compared first; digest lengths are not secret.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

// Security: Don't expose the secret in debug output
impl std::fmt::Debug for SignatureValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureValidator")
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
