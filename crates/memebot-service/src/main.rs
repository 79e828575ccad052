//! # Memebot Service
//!
//! Binary entry point for the memebot HTTP service.
//!
//! This executable:
//! - Loads configuration from files and environment
//! - Initializes logging
//! - Builds the GitHub App clients and meme client
//! - Starts the HTTP server

use memebot_github::auth::{AppCredentials, AppId, JwtSigner};
use memebot_github::client::ClientConfig;
use memebot_github::webhook::{SignatureValidator, WebhookSecret};
use memebot_github::{AppClient, InstallationApi};
use memebot_service::{create_router, AppState, MemeClient, ServiceConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "memebot_service=info,memebot_github=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Memebot Service");

    // A malformed file or unusable value is a hard error: it indicates
    // deliberate-but-broken operator configuration. Exit code 3 marks
    // configuration failures for process supervisors.
    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration; aborting");
            std::process::exit(3);
        }
    };

    if let Err(e) = config.validate() {
        error!(error = %e, "Service configuration is invalid; aborting");
        std::process::exit(3);
    }

    let private_key = match config.load_private_key() {
        Ok(key) => key,
        Err(e) => {
            error!(error = %e, "Failed to load App private key; aborting");
            std::process::exit(3);
        }
    };

    // Shared HTTP client for all outbound calls
    let client_config = ClientConfig::default()
        .with_github_api_url(config.github.api_url.clone())
        .with_timeout(Duration::from_secs(config.server.timeout_seconds));
    let http = client_config.build_http_client()?;

    let credentials = AppCredentials::new(AppId::new(config.github.app_id), private_key);
    let signer = JwtSigner::new(credentials);

    // The meme API gets its own client so meme.timeout_seconds applies
    let memes = match MemeClient::from_config(&config.meme) {
        Ok(memes) => memes,
        Err(e) => {
            error!(error = %e, "Failed to build meme API client; aborting");
            std::process::exit(3);
        }
    };

    let state = AppState::new(
        SignatureValidator::new(WebhookSecret::new(config.github.webhook_secret.clone())),
        Arc::new(AppClient::new(signer, http.clone(), &client_config)),
        Arc::new(InstallationApi::new(http, &client_config)),
        memes,
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %addr, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    info!(address = %addr, app_id = config.github.app_id, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
