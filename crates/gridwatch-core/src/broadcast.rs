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

//! Notification sink that fans a message out to every subscriber.

use crate::traits::{DeliveryReport, MessagingBackend, NotificationSink};
use async_trait::async_trait;
use gridwatch_types::SubscriberSet;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SubscriberBroadcast {
    backend: Arc<dyn MessagingBackend>,
    subscribers: SubscriberSet,
}

impl std::fmt::Debug for SubscriberBroadcast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberBroadcast")
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl SubscriberBroadcast {
    pub fn new(backend: Arc<dyn MessagingBackend>, subscribers: SubscriberSet) -> Self {
        Self {
            backend,
            subscribers,
        }
    }
}

#[async_trait]
impl NotificationSink for SubscriberBroadcast {
    async fn broadcast(&self, text: &str) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for chat_id in &self.subscribers {
            report.attempted += 1;
            match self.backend.send_message(chat_id, text).await {
                Ok(()) => report.delivered += 1,
                Err(e) => warn!("Failed to send message to {chat_id}: {e:#}"),
            }
        }

        info!(
            "Notification delivered to {}/{} subscribers",
            report.delivered, report.attempted
        );
        report
    }
}
