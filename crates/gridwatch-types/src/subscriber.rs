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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque messaging recipient, stored as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Numeric(i64),
    Handle(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Handle(handle) => f.write_str(handle),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ChatId {
    fn from(handle: &str) -> Self {
        Self::Handle(handle.to_owned())
    }
}

/// Known recipients, deduplicated on value, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ChatId>", into = "Vec<ChatId>")]
pub struct SubscriberSet {
    ids: Vec<ChatId>,
}

impl SubscriberSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &ChatId) -> bool {
        self.ids.contains(id)
    }

    /// Add a recipient. Returns `false` if it was already known.
    pub fn insert(&mut self, id: ChatId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatId> {
        self.ids.iter()
    }
}

impl From<Vec<ChatId>> for SubscriberSet {
    fn from(ids: Vec<ChatId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<SubscriberSet> for Vec<ChatId> {
    fn from(set: SubscriberSet) -> Self {
        set.ids
    }
}

impl FromIterator<ChatId> for SubscriberSet {
    fn from_iter<I: IntoIterator<Item = ChatId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SubscriberSet {
    type Item = &'a ChatId;
    type IntoIter = std::slice::Iter<'a, ChatId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// A text message received by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Backend cursor for this message
    pub update_id: i64,
    pub chat_id: ChatId,
    /// Message text, empty for non-text messages
    pub text: String,
}
