//! # Memebot Service
//!
//! HTTP service that receives GitHub webhooks and greets every newly
//! opened pull request with a random meme comment.
//!
//! Request flow for `POST /`:
//! 1. Verify the `X-Hub-Signature-256` HMAC over the raw body (403 on
//!    mismatch or absence)
//! 2. Ignore deliveries that are not `pull_request` events with action
//!    `opened` (200 "Ok")
//! 3. Exchange the App identity for an installation token scoped to the
//!    event's repository (500 on failure)
//! 4. Fetch a random meme; a meme API outage is absorbed and the delivery
//!    still succeeds (200 "ok")
//! 5. Post the meme as a PR comment (500 on failure, 200 "ok" on success)

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument, warn};

use memebot_github::webhook::{
    PullRequestEvent, SignatureValidator, DELIVERY_HEADER, EVENT_HEADER, SIGNATURE_HEADER,
};
use memebot_github::{AppClient, InstallationApi};

pub mod config;
pub mod meme;

pub use config::{ConfigError, ServiceConfig};
pub use meme::{MemeClient, MemeError};

/// Shared state handed to every request handler.
///
/// Everything inside is either cheaply cloneable or behind an `Arc`;
/// handlers never take locks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Verifies webhook delivery signatures.
    pub validator: SignatureValidator,
    /// Exchanges the App identity for installation tokens.
    pub app_client: Arc<AppClient>,
    /// Posts comments with installation tokens.
    pub issues: Arc<InstallationApi>,
    /// Fetches random memes.
    pub memes: MemeClient,
}

impl AppState {
    /// Bundle the service dependencies into handler state.
    pub fn new(
        validator: SignatureValidator,
        app_client: Arc<AppClient>,
        issues: Arc<InstallationApi>,
        memes: MemeClient,
    ) -> Self {
        Self {
            validator,
            app_client,
            issues,
            memes,
        }
    }
}

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving.
    pub status: &'static str,
    /// Service name for fleet dashboards.
    pub service: &'static str,
}

/// Create HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_webhook))
        .route("/health", get(handle_health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
        .with_state(state)
}

/// Handle incoming GitHub webhook deliveries.
///
/// The signature check runs over the raw body bytes before anything is
/// parsed; an unsigned or mis-signed delivery never reaches JSON
/// decoding. Deliveries that are signed but irrelevant (wrong event,
/// wrong action, or a payload shape this bot does not read) are
/// acknowledged with 200 "Ok" so GitHub does not retry them.
#[instrument(skip(state, headers, body))]
async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let delivery = header_str(&headers, DELIVERY_HEADER).unwrap_or("unknown");

    let Some(signature) = header_str(&headers, SIGNATURE_HEADER) else {
        warn!(delivery, "Delivery without signature header rejected");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    };

    if !state.validator.verify(&body, signature) {
        warn!(delivery, "Delivery with invalid signature rejected");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    let Some(event_type) = header_str(&headers, EVENT_HEADER) else {
        return (StatusCode::OK, "Ok").into_response();
    };

    if event_type != "pull_request" {
        return (StatusCode::OK, "Ok").into_response();
    }

    let event: PullRequestEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            // Authenticated but unreadable; ack so GitHub stops retrying
            warn!(error = %e, "Ignoring pull_request delivery with unexpected payload shape");
            return (StatusCode::OK, "Ok").into_response();
        }
    };

    if !event.is_opened() {
        return (StatusCode::OK, "Ok").into_response();
    }

    let owner = &event.repository.owner.login;
    let repo = &event.repository.name;
    let pr_number = event.pull_request.number;

    info!(
        delivery,
        repository = %event.repository.full_name(),
        pr = pr_number,
        base = %event.pull_request.base.name,
        head = %event.pull_request.head.name,
        "Handling newly opened pull request"
    );

    let token = match state.app_client.installation_token_for(owner, repo).await {
        Ok(token) => token,
        Err(e) => {
            error!(
                repository = %event.repository.full_name(),
                error = %e,
                "Installation token exchange failed"
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    // Meme fetch is best-effort: the delivery still counts as handled
    // when the meme API is down.
    let meme_url = match state.memes.random_meme().await {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Meme fetch failed; skipping comment");
            return (StatusCode::OK, "ok").into_response();
        }
    };

    let comment_body = format!("![Alt Text]({})", meme_url);

    match state
        .issues
        .create_comment(&token, owner, repo, pr_number, &comment_body)
        .await
    {
        Ok(comment) => {
            info!(
                repository = %event.repository.full_name(),
                pr = pr_number,
                comment_id = comment.id,
                "Posted meme comment"
            );
            (StatusCode::OK, "ok").into_response()
        }
        Err(e) => {
            error!(
                repository = %event.repository.full_name(),
                pr = pr_number,
                error = %e,
                "Failed to post comment"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Liveness probe.
async fn handle_health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "memebot",
    })
}

/// Read a header as UTF-8, treating absence and non-UTF-8 the same way.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
