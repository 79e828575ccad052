//! GitHub webhook intake: signature validation and event payload types.
//!
//! Signature validation uses HMAC-SHA256 over the raw request body with
//! constant-time comparison. The payload types cover only the fields the
//! dispatcher consumes; GitHub sends far more, and serde ignores the rest.

pub mod event;
pub mod validation;

pub use event::{BranchRef, PullRequestEvent, PullRequestInfo, RepositoryInfo, RepositoryOwner};
pub use validation::{SignatureValidator, WebhookSecret};

/// Header carrying the event type (e.g. `pull_request`).
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying the HMAC-SHA256 payload signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Header carrying GitHub's unique delivery identifier.
pub const DELIVERY_HEADER: &str = "x-github-delivery";
