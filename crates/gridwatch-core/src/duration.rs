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

use chrono::TimeDelta;

/// Whole hours, minutes and seconds of a non-negative duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationParts {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationParts {
    /// Split a duration; negative durations (clock skew) count as zero.
    #[must_use]
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_seconds().max(0);
        Self {
            hours: total.div_euclid(3600),
            minutes: total.rem_euclid(3600).div_euclid(60),
            seconds: total.rem_euclid(60),
        }
    }

    /// Seconds are only worth showing for outages shorter than an hour
    #[must_use]
    pub fn shows_seconds(&self) -> bool {
        self.hours == 0 && self.seconds != 0
    }
}
