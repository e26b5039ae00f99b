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

//! Persisted monitor state, one record per calendar year.

use crate::snapshot::GridStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used in history entries and notification text
pub const DISPLAY_TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Kind of event recorded in the history log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    InverterOffline,
    InverterOnline,
    GridOn,
    GridOff,
}

impl EventKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InverterOffline => "inverter_offline",
            Self::InverterOnline => "inverter_online",
            Self::GridOn => "grid_on",
            Self::GridOff => "grid_off",
        }
    }

    /// History tag for a grid transition into `status`
    #[must_use]
    pub fn for_grid(status: GridStatus) -> Self {
        match status {
            GridStatus::On => Self::GridOn,
            GridStatus::Off => Self::GridOff,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of a detected event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time formatted with [`DISPLAY_TIME_FORMAT`]
    pub time: String,
    pub event: EventKind,
    /// The notification text that was sent
    pub message: String,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(at: NaiveDateTime, event: EventKind, message: impl Into<String>) -> Self {
        Self {
            time: at.format(DISPLAY_TIME_FORMAT).to_string(),
            event,
            message: message.into(),
        }
    }
}

/// State carried between runs.
///
/// `last_off_time` is set only while an outage that started in this year's file is ongoing.
/// `history` is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorState {
    /// Last classified grid status; `None` until the first conclusive reading
    pub grid_status: Option<GridStatus>,

    /// Whether the inverter was last seen reporting fresh data
    pub inverter_online: bool,

    /// Start of the ongoing outage
    pub last_off_time: Option<NaiveDateTime>,

    /// Event log in insertion order
    pub history: Vec<HistoryEntry>,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            grid_status: None,
            inverter_online: true,
            last_off_time: None,
            history: Vec::new(),
        }
    }
}

impl MonitorState {
    /// Append an event to the history log
    pub fn record(&mut self, at: NaiveDateTime, event: EventKind, message: impl Into<String>) {
        self.history.push(HistoryEntry::new(at, event, message));
    }
}
