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

//! Telegram Bot API backend: outgoing notifications and incoming `/start` commands.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_URL, TelegramClient};
pub use error::{TelegramError, TelegramResult};
pub use types::{Chat, Message, TelegramResponse, Update};
