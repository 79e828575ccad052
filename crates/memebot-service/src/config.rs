//! Configuration types for the HTTP service

use memebot_github::auth::PrivateKey;
use serde::{Deserialize, Serialize};

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized.
    #[error("Failed to load configuration: {message}")]
    LoadFailed {
        /// What went wrong.
        message: String,
    },

    /// The configuration loaded but carries an unusable value.
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// What is wrong with the value.
        message: String,
    },

    /// The private key file could not be read.
    #[error("Failed to read private key from '{path}': {message}")]
    PrivateKeyUnreadable {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        message: String,
    },
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub App settings
    #[serde(default)]
    pub github: GithubConfig,

    /// Meme API settings
    #[serde(default)]
    pub meme: MemeConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// GitHub App configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Numeric GitHub App identifier
    #[serde(default)]
    pub app_id: u64,

    /// Path to the PKCS#1 PEM private key issued for the App
    #[serde(default = "default_private_key_path")]
    pub private_key_path: String,

    /// Webhook secret shared with GitHub
    #[serde(default)]
    pub webhook_secret: String,

    /// GitHub API base URL
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            app_id: 0,
            private_key_path: default_private_key_path(),
            webhook_secret: String::new(),
            api_url: default_github_api_url(),
        }
    }
}

/// Meme API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemeConfig {
    /// Meme API base URL (the `/gimme` endpoint lives under this)
    #[serde(default = "default_meme_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_meme_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            api_url: default_meme_api_url(),
            timeout_seconds: default_meme_timeout_seconds(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_private_key_path() -> String {
    "./.env/bot_key.pem".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_meme_api_url() -> String {
    "https://meme-api.herokuapp.com".to_string()
}

fn default_meme_timeout_seconds() -> u64 {
    10
}

impl ServiceConfig {
    /// Load configuration from files and environment.
    ///
    /// Sources (applied in order, later sources override earlier ones):
    ///  1. ./config/memebot.yaml                 - deployment-local file
    ///  2. Path given by MEMEBOT_CONFIG_FILE env - operator-specified file
    ///  3. Environment variables prefixed MEMEBOT (double-underscore
    ///     separator), e.g. MEMEBOT__GITHUB__WEBHOOK_SECRET
    ///
    /// Every field carries a serde default, so an absent file still
    /// produces a config; `validate` then decides whether it is usable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(
            config::File::with_name("config/memebot")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

        if let Ok(explicit_path) = std::env::var("MEMEBOT_CONFIG_FILE") {
            if !explicit_path.is_empty() {
                builder = builder.add_source(
                    config::File::with_name(&explicit_path)
                        .required(true)
                        .format(config::FileFormat::Yaml),
                );
            }
        }

        let raw = builder
            .add_source(config::Environment::with_prefix("MEMEBOT").separator("__"))
            .build()
            .map_err(|e| ConfigError::LoadFailed {
                message: e.to_string(),
            })?;

        raw.try_deserialize().map_err(|e| ConfigError::LoadFailed {
            message: e.to_string(),
        })
    }

    /// Reject configurations the service cannot run with.
    ///
    /// The serde defaults deliberately leave the App identity blank; a
    /// deployment that never set them must fail at startup, not at the
    /// first delivery.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.app_id == 0 {
            return Err(ConfigError::Invalid {
                message: "github.app_id must be set".to_string(),
            });
        }

        if self.github.webhook_secret.is_empty() {
            return Err(ConfigError::Invalid {
                message: "github.webhook_secret must be set".to_string(),
            });
        }

        if self.github.private_key_path.is_empty() {
            return Err(ConfigError::Invalid {
                message: "github.private_key_path must be set".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                message: "server.port must be non-zero".to_string(),
            });
        }

        Ok(())
    }

    /// Read and parse the App private key from `github.private_key_path`.
    pub fn load_private_key(&self) -> Result<PrivateKey, ConfigError> {
        let pem = std::fs::read_to_string(&self.github.private_key_path).map_err(|e| {
            ConfigError::PrivateKeyUnreadable {
                path: self.github.private_key_path.clone(),
                message: e.to_string(),
            }
        })?;

        PrivateKey::from_pem(&pem).map_err(|e| ConfigError::Invalid {
            message: format!("private key at '{}': {}", self.github.private_key_path, e),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
