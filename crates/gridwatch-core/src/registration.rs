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

//! Self-registration of recipients via a bot command.
//!
//! Each invocation looks at the backend's current window of pending messages. No cursor is
//! stored between invocations, so the same messages may be seen again; the "already
//! subscribed" check keeps that harmless.

use crate::messages::Messages;
use crate::subscriber_store::SubscriberStore;
use crate::traits::MessagingBackend;
use anyhow::{Context, Result};
use gridwatch_types::ChatId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Command a recipient sends to subscribe
pub const SUBSCRIBE_COMMAND: &str = "/start";

/// Default long-poll wait for pending messages
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// True for the subscribe command, ignoring case and surrounding whitespace
#[must_use]
pub fn is_subscribe_command(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(SUBSCRIBE_COMMAND)
}

/// Summary of one registration poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Messages returned by the backend
    pub messages_seen: usize,
    /// New subscribers, in the order they were added
    pub added: Vec<ChatId>,
    /// Highest update id seen; reported only, not persisted
    pub last_update_id: Option<i64>,
}

pub struct RegistrationListener {
    backend: Arc<dyn MessagingBackend>,
    store: SubscriberStore,
    messages: Arc<Messages>,
    poll_timeout: Duration,
}

impl std::fmt::Debug for RegistrationListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationListener")
            .field("store", &self.store)
            .field("poll_timeout", &self.poll_timeout)
            .finish_non_exhaustive()
    }
}

impl RegistrationListener {
    pub fn new(
        backend: Arc<dyn MessagingBackend>,
        store: SubscriberStore,
        messages: Arc<Messages>,
    ) -> Self {
        Self {
            backend,
            store,
            messages,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Fetch pending messages once and register every new sender of the subscribe command.
    ///
    /// The subscriber file is rewritten right after each addition. A failed confirmation
    /// is logged and does not undo the registration.
    pub async fn poll_once(&self) -> Result<RegistrationReport> {
        let mut subscribers = self.store.load()?;
        let updates = self
            .backend
            .get_updates(None, self.poll_timeout)
            .await
            .context("Failed to fetch pending messages")?;

        let mut report = RegistrationReport {
            messages_seen: updates.len(),
            ..Default::default()
        };

        for message in updates {
            report.last_update_id = report.last_update_id.max(Some(message.update_id));

            if !is_subscribe_command(&message.text) {
                continue;
            }

            if !subscribers.insert(message.chat_id.clone()) {
                debug!("{} is already subscribed", message.chat_id);
                continue;
            }

            self.store.save(&subscribers)?;
            info!("New subscriber: {}", message.chat_id);

            let confirmation = self.messages.subscribe_confirmation();
            if let Err(e) = self
                .backend
                .send_message(&message.chat_id, &confirmation)
                .await
            {
                warn!(
                    "Failed to confirm subscription to {}: {e:#}",
                    message.chat_id
                );
            }

            report.added.push(message.chat_id);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_command_matching() {
        assert!(is_subscribe_command("/start"));
        assert!(is_subscribe_command(" /START "));
        assert!(is_subscribe_command("\t/Start\n"));
        assert!(!is_subscribe_command("/start now"));
        assert!(!is_subscribe_command("start"));
        assert!(!is_subscribe_command(""));
    }
}
