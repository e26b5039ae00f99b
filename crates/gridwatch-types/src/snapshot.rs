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

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the site is exchanging power with the utility grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridStatus {
    /// Grid is live
    #[serde(rename = "ON")]
    On,
    /// Site is running isolated on inverter/battery
    #[serde(rename = "OFF")]
    Off,
}

impl GridStatus {
    /// Upper-case label used in the state file and logs
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl fmt::Display for GridStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One realtime reading from the telemetry API.
///
/// Missing numeric fields are carried as zero. Not persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    /// Power exchanged with the grid (W); sign gives the direction
    pub feed_in_power_w: f64,
    /// AC output of the inverter serving the house load (W)
    pub ac_power_w: f64,
    /// Battery state of charge (0-100%)
    pub state_of_charge: f64,
    /// When the device last pushed data to the cloud (device local time)
    pub upload_time: Option<NaiveDateTime>,
}
