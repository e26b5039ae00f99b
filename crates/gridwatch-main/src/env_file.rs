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

use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Outcome of looking for a `.env` file
#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    Absent,
    Failed(dotenvy::Error),
}

impl EnvFile {
    /// Load `.env` from the working directory or the nearest parent that has one.
    ///
    /// Variables already present in the process environment are not overridden.
    pub fn load() -> Self {
        Self::from_result(dotenvy::dotenv())
    }

    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::Absent,
            Err(e) => Self::Failed(e),
        }
    }

    /// Report the outcome; call once tracing is installed
    pub fn log(&self) {
        match self {
            Self::Loaded(path) => info!("📄 Loaded environment from {}", path.display()),
            Self::Absent => debug!("No .env file, using the process environment only"),
            Self::Failed(e) => warn!("⚠️ Failed to load .env file: {e}"),
        }
    }
}
