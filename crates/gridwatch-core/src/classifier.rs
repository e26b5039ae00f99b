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

//! Grid status and staleness heuristics over a single telemetry snapshot.

use chrono::{NaiveDateTime, TimeDelta};
use gridwatch_types::{GridStatus, StatusSnapshot};

/// Default age after which the inverter counts as offline
pub const DEFAULT_STALE_AFTER: TimeDelta = TimeDelta::minutes(5);

/// Classify grid connectivity from a reading.
///
/// Any power flow to or from the grid means the grid is live. No flow while the house is
/// still being served means the site runs on inverter/battery alone. Anything else is
/// inconclusive and yields `None`.
#[must_use]
pub fn classify_grid(snapshot: &StatusSnapshot) -> Option<GridStatus> {
    if snapshot.feed_in_power_w != 0.0 {
        Some(GridStatus::On)
    } else if snapshot.ac_power_w > 0.0 {
        Some(GridStatus::Off)
    } else {
        None
    }
}

/// True when the device has not refreshed its data for longer than `threshold`.
///
/// A reading without an upload time is never considered stale.
#[must_use]
pub fn is_stale(snapshot: &StatusSnapshot, now: NaiveDateTime, threshold: TimeDelta) -> bool {
    snapshot
        .upload_time
        .is_some_and(|uploaded| now - uploaded > threshold)
}
