// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of gridwatch.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use crate::error::{TelegramError, TelegramResult};
use crate::types::{TelegramResponse, Update};
use async_trait::async_trait;
use gridwatch_core::MessagingBackend;
use gridwatch_types::{ChatId, InboundMessage};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, trace};

/// Public Bot API endpoint
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

const SEND_TIMEOUT: Duration = Duration::from_secs(5);
/// Extra time on top of the long-poll wait before the request itself times out
const LONG_POLL_GRACE: Duration = Duration::from_secs(30);

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    base_url: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a client for the bot identified by `token`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> TelegramResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            TelegramError::ConfigError(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
            client,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    /// Send a plain-text message
    pub async fn send_text(&self, chat_id: &ChatId, text: &str) -> TelegramResult<()> {
        debug!("📨 [TELEGRAM] Sending message to {chat_id}");
        let response = self
            .client
            .post(self.endpoint("sendMessage"))
            .timeout(SEND_TIMEOUT)
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?;

        Self::read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Long-poll for pending updates
    pub async fn fetch_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> TelegramResult<Vec<Update>> {
        let mut request = self
            .client
            .get(self.endpoint("getUpdates"))
            .timeout(timeout + LONG_POLL_GRACE)
            .query(&[("timeout", timeout.as_secs())]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let updates = Self::read_envelope::<Vec<Update>>(request.send().await?)
            .await?
            .unwrap_or_default();
        debug!("📥 [TELEGRAM] Received {} updates", updates.len());
        Ok(updates)
    }

    async fn read_envelope<T: DeserializeOwned>(response: Response) -> TelegramResult<Option<T>> {
        let status = response.status();
        let body = response.text().await?;
        trace!("Telegram response {status}: {body}");

        let envelope: TelegramResponse<T> =
            serde_json::from_str(&body).map_err(|e| TelegramError::ApiError {
                status: status.as_u16(),
                description: format!("unreadable response: {e}"),
            })?;

        if !envelope.ok {
            return Err(TelegramError::ApiError {
                status: status.as_u16(),
                description: envelope
                    .description
                    .unwrap_or_else(|| "ok=false".to_owned()),
            });
        }
        Ok(envelope.result)
    }
}

#[async_trait]
impl MessagingBackend for TelegramClient {
    async fn send_message(&self, chat_id: &ChatId, text: &str) -> anyhow::Result<()> {
        Ok(self.send_text(chat_id, text).await?)
    }

    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> anyhow::Result<Vec<InboundMessage>> {
        let updates = self.fetch_updates(offset, timeout).await?;
        Ok(updates
            .into_iter()
            .filter_map(Update::into_inbound)
            .collect())
    }
}
