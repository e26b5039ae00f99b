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

//! In-memory collaborators for driving the core without a network.

#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use gridwatch_core::{DeliveryReport, MessagingBackend, NotificationSink, TelemetrySource};
use gridwatch_types::{ChatId, InboundMessage, StatusSnapshot};
use std::sync::Mutex;
use std::time::Duration;

/// Telemetry source returning a fixed answer
pub struct FixedTelemetry(pub Option<StatusSnapshot>);

#[async_trait]
impl TelemetrySource for FixedTelemetry {
    async fn fetch_status(&self) -> Result<StatusSnapshot> {
        match &self.0 {
            Some(snapshot) => Ok(snapshot.clone()),
            None => bail!("operation timed out"),
        }
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Sink remembering every broadcast text
#[derive(Default)]
pub struct RecordingSink {
    pub recipients: usize,
    pub sent: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn with_recipients(recipients: usize) -> Self {
        Self {
            recipients,
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn broadcast(&self, text: &str) -> DeliveryReport {
        self.sent.lock().unwrap().push(text.to_owned());
        DeliveryReport {
            attempted: self.recipients,
            delivered: self.recipients,
        }
    }
}

/// Messaging backend with a scripted inbox and a record of sent messages
#[derive(Default)]
pub struct ScriptedBackend {
    pub inbox: Vec<InboundMessage>,
    pub sent: Mutex<Vec<(ChatId, String)>>,
    pub fail_updates: bool,
}

impl ScriptedBackend {
    pub fn with_inbox(inbox: Vec<InboundMessage>) -> Self {
        Self {
            inbox,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingBackend for ScriptedBackend {
    async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.clone(), text.to_owned()));
        Ok(())
    }

    async fn get_updates(
        &self,
        _offset: Option<i64>,
        _timeout: Duration,
    ) -> Result<Vec<InboundMessage>> {
        if self.fail_updates {
            bail!("Bad Gateway");
        }
        Ok(self.inbox.clone())
    }
}

pub fn message(update_id: i64, chat_id: i64, text: &str) -> InboundMessage {
    InboundMessage {
        update_id,
        chat_id: ChatId::Numeric(chat_id),
        text: text.to_owned(),
    }
}
