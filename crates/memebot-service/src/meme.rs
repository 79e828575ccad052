//! Client for the public meme API.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::{ConfigError, MemeConfig};

/// Errors from fetching a meme.
#[derive(Debug, thiserror::Error)]
pub enum MemeError {
    /// The request never completed (DNS, connect, timeout).
    #[error("Meme API request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a non-success status.
    #[error("Meme API returned HTTP {status}")]
    HttpError {
        /// Status code from the response.
        status: u16,
    },

    /// The response body was not the expected JSON shape.
    #[error("Malformed meme API response: {message}")]
    MalformedResponse {
        /// Parse failure detail.
        message: String,
    },

    /// The response parsed but offered no preview images.
    #[error("Meme API response contained no preview images")]
    NoPreviews,
}

/// The subset of the `/gimme` response the bot uses.
///
/// `preview` is ordered worst-to-best resolution; the last entry is the
/// one worth posting.
#[derive(Debug, Deserialize)]
struct MemeResponse {
    preview: Vec<String>,
}

/// Fetches random memes from a meme API.
#[derive(Debug, Clone)]
pub struct MemeClient {
    http: reqwest::Client,
    api_url: String,
}

impl MemeClient {
    /// Create a client against the given API base URL.
    pub fn new(http: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from the meme section of the service configuration.
    ///
    /// The meme API gets its own `reqwest::Client` so its timeout is
    /// governed by `meme.timeout_seconds` rather than whatever bound the
    /// GitHub client carries.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &MemeConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ConfigError::Invalid {
                message: format!("meme API client: {}", e),
            })?;
        Ok(Self::new(http, config.api_url.clone()))
    }

    /// Fetch one random meme and return the URL of its best-resolution
    /// preview.
    pub async fn random_meme(&self) -> Result<String, MemeError> {
        let url = format!("{}/gimme", self.api_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MemeError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MemeError::HttpError {
                status: status.as_u16(),
            });
        }

        let meme: MemeResponse =
            response
                .json()
                .await
                .map_err(|e| MemeError::MalformedResponse {
                    message: e.to_string(),
                })?;

        let best = meme.preview.last().cloned().ok_or(MemeError::NoPreviews)?;

        debug!(url = %best, "Fetched meme preview");
        Ok(best)
    }
}

#[cfg(test)]
#[path = "meme_tests.rs"]
mod tests;
