//! Tests for webhook signature validation.

use super::*;

fn validator(secret: &str) -> SignatureValidator {
    SignatureValidator::new(WebhookSecret::new(secret))
}

/// Compute `sha256=<hex>` for a payload the way GitHub does.
fn sign(secret: &str, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(payload);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

// ============================================================================
// Test: Valid Signature Validation
// ============================================================================

#[test]
fn test_verify_with_valid_signature() {
    // Arrange: Create validator with known secret
    let secret = "test_webhook_secret";
    let validator = validator(secret);

    // GitHub webhook example payload
    let payload = br#"{"action":"opened","number":1,"pull_request":{"id":1}}"#;
    let signature = sign(secret, payload);

    // Act & Assert
    assert!(validator.verify(payload, &signature));
}

#[test]
fn test_verify_with_empty_payload() {
    // An empty body still has a well-defined HMAC
    let secret = "test_webhook_secret";
    let validator = validator(secret);

    let signature = sign(secret, b"");

    assert!(validator.verify(b"", &signature));
}

#[test]
fn test_verify_with_empty_secret() {
    // Empty key is accepted by HMAC; verification still works end-to-end
    let validator = validator("");
    let payload = br#"{"action":"opened"}"#;

    let signature = sign("", payload);

    assert!(validator.verify(payload, &signature));
}

#[test]
fn test_verify_with_secret_containing_special_characters() {
    let secret = "s3cr3t!@#$%^&*()_+-=[]{}|;':\",./<>?`~";
    let validator = validator(secret);
    let payload = br#"{"action":"opened"}"#;

    let signature = sign(secret, payload);

    assert!(validator.verify(payload, &signature));
}

// ============================================================================
// Test: Invalid Signature Rejection
// ============================================================================

#[test]
fn test_verify_rejects_tampered_payload() {
    let secret = "test_webhook_secret";
    let validator = validator(secret);

    let original = br#"{"action":"opened","number":1}"#;
    let tampered = br#"{"action":"opened","number":2}"#;
    let signature = sign(secret, original);

    assert!(!validator.verify(tampered, &signature));
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let validator = validator("correct_secret");
    let payload = br#"{"action":"opened"}"#;

    let signature = sign("wrong_secret", payload);

    assert!(!validator.verify(payload, &signature));
}

#[test]
fn test_verify_rejects_flipped_hex_character() {
    let secret = "test_webhook_secret";
    let validator = validator(secret);
    let payload = br#"{"action":"opened"}"#;

    let signature = sign(secret, payload);
    // Flip the last hex character
    let mut chars: Vec<char> = signature.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == '0' { '1' } else { '0' };
    let flipped: String = chars.into_iter().collect();

    assert!(!validator.verify(payload, &flipped));
}

// ============================================================================
// Test: Malformed Signature Handling
// ============================================================================

#[test]
fn test_verify_rejects_missing_prefix() {
    let secret = "test_webhook_secret";
    let validator = validator(secret);
    let payload = br#"{"action":"opened"}"#;

    // Valid digest but no "sha256=" prefix
    let signature = sign(secret, payload);
    let bare_digest = signature.strip_prefix("sha256=").unwrap();

    assert!(!validator.verify(payload, bare_digest));
}

#[test]
fn test_verify_rejects_wrong_algorithm_prefix() {
    let secret = "test_webhook_secret";
    let validator = validator(secret);
    let payload = br#"{"action":"opened"}"#;

    let signature = sign(secret, payload).replace("sha256=", "sha1=");

    assert!(!validator.verify(payload, &signature));
}

#[test]
fn test_verify_rejects_invalid_hex() {
    let validator = validator("test_webhook_secret");
    let payload = br#"{"action":"opened"}"#;

    assert!(!validator.verify(payload, "sha256=not-valid-hex-zz"));
}

#[test]
fn test_verify_rejects_truncated_digest() {
    let secret = "test_webhook_secret";
    let validator = validator(secret);
    let payload = br#"{"action":"opened"}"#;

    let signature = sign(secret, payload);
    let truncated = &signature[..signature.len() - 8];

    assert!(!validator.verify(payload, truncated));
}

#[test]
fn test_verify_rejects_empty_signature() {
    let validator = validator("test_webhook_secret");

    assert!(!validator.verify(br#"{"action":"opened"}"#, ""));
}

#[test]
fn test_verify_rejects_prefix_only() {
    // "sha256=" with no digest decodes to zero bytes, which can never
    // match a 32-byte HMAC output
    let validator = validator("test_webhook_secret");

    assert!(!validator.verify(br#"{"action":"opened"}"#, "sha256="));
}

// ============================================================================
// Test: Secret Redaction
// ============================================================================

#[test]
fn test_webhook_secret_debug_is_redacted() {
    let secret = WebhookSecret::new("super_secret_value");
    let output = format!("{:?}", secret);

    assert!(!output.contains("super_secret_value"));
    assert!(output.contains("REDACTED"));
}

#[test]
fn test_validator_debug_is_redacted() {
    let validator = validator("super_secret_value");
    let output = format!("{:?}", validator);

    assert!(!output.contains("super_secret_value"));
    assert!(output.contains("REDACTED"));
}
