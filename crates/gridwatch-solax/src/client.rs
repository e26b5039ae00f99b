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

use crate::error::{SolaxError, SolaxResult};
use crate::realtime::SolaxResponse;
use async_trait::async_trait;
use gridwatch_core::TelemetrySource;
use gridwatch_types::StatusSnapshot;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// SolaX Cloud realtime API client for a single inverter
#[derive(Clone)]
pub struct SolaxCloudClient {
    api_url: String,
    token_id: String,
    serial: String,
    client: Client,
}

impl std::fmt::Debug for SolaxCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolaxCloudClient")
            .field("api_url", &self.api_url)
            .field("serial", &self.serial)
            .field("token_id", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SolaxCloudClient {
    /// Create a client for the realtime endpoint at `api_url`
    pub fn new(
        api_url: impl Into<String>,
        token_id: impl Into<String>,
        serial: impl Into<String>,
    ) -> SolaxResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SolaxError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_url: api_url.into(),
            token_id: token_id.into(),
            serial: serial.into(),
            client,
        })
    }

    /// Query the realtime endpoint once
    pub async fn fetch_realtime(&self) -> SolaxResult<StatusSnapshot> {
        debug!("🔍 [SOLAX] Fetching realtime data for {}", self.serial);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("tokenId", &self.token_id), ("sn", &self.serial)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let parsed: SolaxResponse = serde_json::from_str(&body).map_err(|e| {
            if !status.is_success() {
                warn!("❌ [SOLAX] Status {status}: {body}");
            }
            SolaxError::MalformedPayload(format!("HTTP {status}: {e}"))
        })?;

        let snapshot = parsed.into_snapshot()?;
        debug!(
            "✅ [SOLAX] feed-in={}W ac={}W soc={}% uploaded={:?}",
            snapshot.feed_in_power_w,
            snapshot.ac_power_w,
            snapshot.state_of_charge,
            snapshot.upload_time
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl TelemetrySource for SolaxCloudClient {
    async fn fetch_status(&self) -> anyhow::Result<StatusSnapshot> {
        Ok(self.fetch_realtime().await?)
    }

    fn name(&self) -> &str {
        "solax-cloud"
    }
}
