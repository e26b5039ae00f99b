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

use crate::error::StoreResult;
use crate::json_file::{read_json, write_json_atomic};
use gridwatch_types::SubscriberSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default subscriber file name inside the data directory
pub const SUBSCRIBERS_FILE: &str = "subscribers.json";

/// Flat JSON list of recipients, rewritten wholesale on every change.
#[derive(Debug, Clone)]
pub struct SubscriberStore {
    path: PathBuf,
}

impl SubscriberStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/subscribers.json`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(SUBSCRIBERS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all subscribers; an absent file means nobody has subscribed yet.
    pub fn load(&self) -> StoreResult<SubscriberSet> {
        let subscribers = read_json::<SubscriberSet>(&self.path)?.unwrap_or_default();
        debug!(
            "Loaded {} subscribers from {}",
            subscribers.len(),
            self.path.display()
        );
        Ok(subscribers)
    }

    pub fn save(&self, subscribers: &SubscriberSet) -> StoreResult<()> {
        write_json_atomic(&self.path, subscribers, false)
    }
}
