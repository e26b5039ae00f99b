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

//! Wire format of the realtime endpoint and its mapping to [`StatusSnapshot`].

use crate::error::{SolaxError, SolaxResult};
use chrono::NaiveDateTime;
use gridwatch_types::StatusSnapshot;
use serde::{Deserialize, Serialize};

/// Format of `uploadTime` (device local time)
pub const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Envelope returned by the realtime endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolaxResponse {
    pub success: bool,
    /// Human-readable status, e.g. "Query success!"
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub result: Option<RealtimeData>,
}

/// Realtime values of one inverter. The API sends `null` for values it does not have.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeData {
    #[serde(default, rename = "feedinpower")]
    pub feed_in_power: Option<f64>,
    #[serde(default, rename = "acpower")]
    pub ac_power: Option<f64>,
    #[serde(default)]
    pub soc: Option<f64>,
    #[serde(default)]
    pub upload_time: Option<String>,
}

impl RealtimeData {
    /// Convert to a snapshot, treating missing numbers as zero.
    pub fn to_snapshot(&self) -> SolaxResult<StatusSnapshot> {
        let upload_time = self
            .upload_time
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw.trim(), UPLOAD_TIME_FORMAT).map_err(|e| {
                    SolaxError::MalformedPayload(format!("invalid uploadTime '{raw}': {e}"))
                })
            })
            .transpose()?;

        Ok(StatusSnapshot {
            feed_in_power_w: self.feed_in_power.unwrap_or_default(),
            ac_power_w: self.ac_power.unwrap_or_default(),
            state_of_charge: self.soc.unwrap_or_default(),
            upload_time,
        })
    }
}

impl SolaxResponse {
    /// Unwrap a successful response into a snapshot
    pub fn into_snapshot(self) -> SolaxResult<StatusSnapshot> {
        if !self.success {
            return Err(SolaxError::ApiError(
                self.exception
                    .unwrap_or_else(|| "success=false without details".to_owned()),
            ));
        }

        let result = self.result.ok_or_else(|| {
            SolaxError::MalformedPayload("success=true but no result".to_owned())
        })?;
        result.to_snapshot()
    }
}
