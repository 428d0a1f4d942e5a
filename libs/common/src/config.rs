//! Client configuration
//!
//! Settings are read from the environment with the `WHY_MUSIC_` prefix and
//! fall back to defaults suitable for a local backend.

use std::time::Duration;

use config::{Config, Environment};
use reqwest::Url;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;

/// Configuration shared by the client apps
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend user API
    pub api_base_url: String,
    /// Timeout applied to every API request, in seconds
    pub request_timeout_seconds: u64,
    /// Pause between a successful registration and the redirect to login
    pub redirect_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `WHY_MUSIC_API_BASE_URL`: Backend base URL (default: "http://localhost:8080")
    /// - `WHY_MUSIC_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 10)
    /// - `WHY_MUSIC_REDIRECT_DELAY_MS`: Delay before the post-registration redirect (default: 2000)
    pub fn from_env() -> ClientResult<Self> {
        let config: ClientConfig = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_seconds", DEFAULT_REQUEST_TIMEOUT_SECONDS)?
            .set_default("redirect_delay_ms", DEFAULT_REDIRECT_DELAY_MS)?
            .add_source(Environment::with_prefix("WHY_MUSIC").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.request_timeout_seconds == 0 {
            return Err(ClientError::Configuration(
                "request_timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed backend base URL
    pub fn base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            ClientError::Configuration(format!(
                "Invalid API base URL {}: {}",
                self.api_base_url, e
            ))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ClientError::Configuration(format!(
                "Unsupported API base URL scheme: {}",
                scheme
            ))),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}
