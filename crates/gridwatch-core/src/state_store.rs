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

//! Persistence for the per-year monitor state.
//!
//! Each calendar year gets its own file; a new year starts from a fresh default state and
//! never migrates data from the previous year.

use crate::error::StoreResult;
use crate::json_file::{read_json, write_json_atomic};
use gridwatch_types::MonitorState;
use std::path::PathBuf;
use tracing::info;

/// Year-scoped state file store.
#[derive(Debug, Clone)]
pub struct StateStore {
    data_dir: PathBuf,
}

impl StateStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// State file for a calendar year, e.g. `solax_state_2025.json`.
    #[must_use]
    pub fn path_for_year(&self, year: i32) -> PathBuf {
        self.data_dir.join(format!("solax_state_{year}.json"))
    }

    /// Load the state for `year`, or the defaults if that year has no file yet.
    pub fn load(&self, year: i32) -> StoreResult<MonitorState> {
        let path = self.path_for_year(year);
        match read_json::<MonitorState>(&path)? {
            Some(state) => {
                info!(
                    "Loaded state from {}: grid={}, inverter_online={}, history={}",
                    path.display(),
                    state.grid_status.map_or("unknown", |s| s.as_str()),
                    state.inverter_online,
                    state.history.len()
                );
                Ok(state)
            }
            None => {
                info!("No state file at {}, starting fresh", path.display());
                Ok(MonitorState::default())
            }
        }
    }

    /// Save the state for `year`.
    ///
    /// Uses atomic write (temp file + rename) to prevent corruption.
    pub fn save(&self, year: i32, state: &MonitorState) -> StoreResult<()> {
        let path = self.path_for_year(year);
        write_json_atomic(&path, state, true)?;
        info!(
            "Saved state to {} ({} history entries)",
            path.display(),
            state.history.len()
        );
        Ok(())
    }
}
