//! HTTP client for the character service.

use std::time::Duration;

use serde::Deserialize;

use crate::error::FetchError;

/// Public character-service endpoint.
pub const DEFAULT_API_BASE: &str = "https://character-service.dndbeyond.com";

/// Connection settings for the character service.
#[derive(Debug, Clone)]
pub struct BeyondConfig {
    /// Base URL, without the `/character/v3/...` path.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BeyondConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl BeyondConfig {
    /// Set the base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Response envelope around a character document.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Client for the character service.
#[derive(Debug, Clone)]
pub struct BeyondClient {
    config: BeyondConfig,
    client: reqwest::Client,
}

impl BeyondClient {
    /// Create a client.
    pub fn new(config: BeyondConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { config, client })
    }

    /// URL of a character document.
    pub fn character_url(&self, character_id: u64) -> String {
        format!(
            "{}/character/v3/character/{character_id}",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Fetch the raw character document for a player, unwrapped from its envelope.
    pub async fn fetch_document(
        &self,
        player: &str,
        character_id: u64,
    ) -> Result<serde_json::Value, FetchError> {
        let url = self.character_url(character_id);
        tracing::debug!(player, %url, "fetching character");

        let http = |source| FetchError::Http {
            player: player.to_string(),
            source,
        };
        let response = self.client.get(&url).send().await.map_err(http)?;

        let status = response.status();
        let body = response.text().await.map_err(http)?;
        if !status.is_success() {
            return Err(FetchError::Status {
                player: player.to_string(),
                status,
                body,
            });
        }

        parse_envelope(player, &body)
    }
}

/// Extract the `data` document from a response body.
pub fn parse_envelope(player: &str, body: &str) -> Result<serde_json::Value, FetchError> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|source| FetchError::Decode {
        player: player.to_string(),
        source,
    })?;
    match envelope.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(FetchError::EmptyEnvelope {
            player: player.to_string(),
            message: envelope.message.unwrap_or_default(),
        }),
    }
}
