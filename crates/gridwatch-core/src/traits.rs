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

use anyhow::Result;
use async_trait::async_trait;
use gridwatch_types::{ChatId, InboundMessage, StatusSnapshot};
use std::time::Duration;

// ============= External Collaborators =============

/// Source of realtime inverter readings
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch the current reading.
    ///
    /// Any error (network, timeout, API-reported failure, malformed payload) means the
    /// inverter is unavailable for this cycle.
    async fn fetch_status(&self) -> Result<StatusSnapshot>;

    /// Name for logging
    fn name(&self) -> &str;
}

/// Chat backend used both for notifications and for receiving commands
#[async_trait]
pub trait MessagingBackend: Send + Sync {
    /// Send a UTF-8 text message to one recipient
    async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<()>;

    /// Fetch pending inbound messages, long-polling for up to `timeout`
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<InboundMessage>>;
}

/// Outcome of delivering one notice to every recipient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub delivered: usize,
}

impl DeliveryReport {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.attempted - self.delivered
    }
}

/// Delivers a notice to every known recipient.
///
/// Failures are per recipient and never abort the batch, so this cannot fail as a whole.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn broadcast(&self, text: &str) -> DeliveryReport;
}
