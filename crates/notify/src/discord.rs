//! Minimal Discord REST client: the bot only ever creates messages.

use std::time::Duration;

use dealherald_core::constants::{DISCORD_MESSAGE_LIMIT, HTTP_TIMEOUT_SECS};

use crate::embed::Embed;
use crate::error::NotifyError;

/// Production endpoint of the Discord REST API.
pub const DISCORD_API_BASE_URL: &str = "https://discord.com/api/v10";

/// Client for posting messages to a Discord channel with a bot token.
#[derive(Clone)]
pub struct DiscordClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("client", &self.client)
            .field("token", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DiscordClient {
    /// Creates a client with the given bot token against `base_url` (see
    /// [`DISCORD_API_BASE_URL`] for production).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: String, base_url: impl Into<String>) -> Result<Self, NotifyError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotifyError::ClientInit(e.to_string()))?;
        Ok(Self { client, token, base_url })
    }

    /// Posts a plain-text message to `channel_id`.
    ///
    /// # Errors
    /// Fails when the content exceeds Discord's message cap, the request
    /// fails, or Discord answers with a non-success status.
    pub async fn post_message(&self, channel_id: &str, content: &str) -> Result<(), NotifyError> {
        if content.len() > DISCORD_MESSAGE_LIMIT {
            return Err(NotifyError::MessageTooLong {
                len: content.len(),
                limit: DISCORD_MESSAGE_LIMIT,
            });
        }
        self.create_message(channel_id, &serde_json::json!({ "content": content })).await
    }

    /// Posts a single rich embed to `channel_id`.
    ///
    /// # Errors
    /// Fails when the request fails or Discord answers with a non-success
    /// status.
    pub async fn post_embed(&self, channel_id: &str, embed: &Embed) -> Result<(), NotifyError> {
        self.create_message(channel_id, &serde_json::json!({ "embeds": [embed] })).await
    }

    async fn create_message(
        &self,
        channel_id: &str,
        body: &serde_json::Value,
    ) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(format!("{}/channels/{channel_id}/messages", self.base_url))
            .header("Authorization", format!("Bot {}", self.token))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::HttpStatus { code: status.as_u16(), body });
        }
        tracing::debug!(channel_id, "posted message to Discord");
        Ok(())
    }
}
