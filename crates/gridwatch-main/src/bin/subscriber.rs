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

use anyhow::{Context, Result};
use gridwatch_core::registration::DEFAULT_POLL_TIMEOUT;
use gridwatch_main::{EnvFile, SubscriberConfig, init_tracing, run_subscriber};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = EnvFile::load();
    init_tracing()?;
    env_file.log();

    let config = SubscriberConfig::from_env().context("Invalid configuration")?;

    info!(
        "🚀 Starting gridwatch subscriber listener v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("   Telegram endpoint: {}", config.telegram.api_url);
    info!("   Language: {}", config.language.display_name());
    info!("   Data dir: {}", config.data_dir.display());

    let report = run_subscriber(&config, DEFAULT_POLL_TIMEOUT)
        .await
        .inspect_err(|e| error!("❌ Registration poll failed: {e:#}"))?;

    info!(
        "✅ Processed {} messages, {} new subscribers, last update id {:?}",
        report.messages_seen,
        report.added.len(),
        report.last_update_id
    );
    Ok(())
}
