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

//! Wiring for the two entry points: the scheduled outage notifier and the subscriber
//! registration listener.

pub mod config;
mod env_file;
mod logging;

pub use config::{ConfigError, NotifierConfig, SubscriberConfig, TelegramConfig};
pub use env_file::EnvFile;
pub use logging::init_tracing;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use gridwatch_core::{
    CycleReport, Messages, Monitor, RegistrationListener, RegistrationReport, StateStore,
    SubscriberBroadcast, SubscriberStore, TransitionEngine,
};
use gridwatch_solax::SolaxCloudClient;
use gridwatch_telegram::TelegramClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

fn telegram_client(config: &TelegramConfig) -> Result<Arc<TelegramClient>> {
    let client = TelegramClient::new(&config.api_url, &config.token)
        .context("Failed to create Telegram client")?;
    Ok(Arc::new(client))
}

/// Perform one notifier poll as of `now`
pub async fn run_notifier(config: &NotifierConfig, now: NaiveDateTime) -> Result<CycleReport> {
    let messages = Arc::new(
        Messages::for_language(config.language).context("Failed to load message catalog")?,
    );
    let telemetry = SolaxCloudClient::new(
        &config.solax_api_url,
        &config.solax_token,
        &config.solax_sn,
    )
    .context("Failed to create SolaX client")?;

    let subscribers = SubscriberStore::in_dir(&config.data_dir).load()?;
    info!("👥 Loaded {} subscribers", subscribers.len());

    let sink = SubscriberBroadcast::new(telegram_client(&config.telegram)?, subscribers);
    let engine = TransitionEngine::new(messages).with_stale_after(config.stale_after);
    let monitor = Monitor::new(
        Arc::new(telemetry),
        Arc::new(sink),
        StateStore::new(&config.data_dir),
        engine,
    );

    Ok(monitor.run_once(now).await?)
}

/// Perform one registration poll with the given long-poll wait
pub async fn run_subscriber(
    config: &SubscriberConfig,
    poll_timeout: Duration,
) -> Result<RegistrationReport> {
    let messages = Arc::new(
        Messages::for_language(config.language).context("Failed to load message catalog")?,
    );
    let listener = RegistrationListener::new(
        telegram_client(&config.telegram)?,
        SubscriberStore::in_dir(&config.data_dir),
        messages,
    )
    .with_poll_timeout(poll_timeout);

    info!(
        "👂 Listening for subscribe commands (up to {}s)",
        poll_timeout.as_secs()
    );
    listener.poll_once().await
}
