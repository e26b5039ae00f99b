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

//! Shared data model for the grid watcher: telemetry snapshots, the persisted
//! per-year monitor state and subscriber identities.

pub mod snapshot;
pub mod state;
pub mod subscriber;

// Re-export common types for convenience
pub use snapshot::{GridStatus, StatusSnapshot};
pub use state::{DISPLAY_TIME_FORMAT, EventKind, HistoryEntry, MonitorState};
pub use subscriber::{ChatId, InboundMessage, SubscriberSet};
