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

//! JSON document helpers shared by the state and subscriber stores.

use crate::error::{StoreError, StoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read and parse a JSON document. A missing file yields `None`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Replace a JSON document atomically (temp file + rename).
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T, pretty: bool) -> StoreResult<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(io_err)?;
    fs::rename(&temp_path, path).map_err(io_err)?;

    Ok(())
}
