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

//! Subset of the Bot API objects this crate reads.

use gridwatch_types::{ChatId, InboundMessage};
use serde::{Deserialize, Serialize};

/// Envelope of every Bot API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Updates without a message (edits, callbacks, ...) yield `None`
    #[must_use]
    pub fn into_inbound(self) -> Option<InboundMessage> {
        let message = self.message?;
        Some(InboundMessage {
            update_id: self.update_id,
            chat_id: ChatId::Numeric(message.chat.id),
            text: message.text.unwrap_or_default(),
        })
    }
}
