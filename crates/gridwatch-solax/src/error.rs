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

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolaxError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("SolaX API reported failure: {0}")]
    ApiError(String),

    #[error("Malformed SolaX payload: {0}")]
    MalformedPayload(String),
}

pub type SolaxResult<T> = Result<T, SolaxError>;
