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
use chrono::Local;
use gridwatch_main::{EnvFile, NotifierConfig, init_tracing, run_notifier};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = EnvFile::load();
    init_tracing()?;
    env_file.log();

    let config = NotifierConfig::from_env().context("Invalid configuration")?;

    info!(
        "🚀 Starting gridwatch notifier v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("📋 Configuration Summary:");
    info!("   SolaX endpoint: {}", config.solax_api_url);
    info!("   Inverter serial: {}", config.solax_sn);
    info!("   Telegram endpoint: {}", config.telegram.api_url);
    info!("   Language: {}", config.language.display_name());
    info!("   Data dir: {}", config.data_dir.display());
    info!(
        "   Stale after: {} min",
        config.stale_after.num_minutes()
    );

    let report = run_notifier(&config, Local::now().naive_local())
        .await
        .inspect_err(|e| error!("❌ Notifier run failed: {e:#}"))?;

    info!(
        "✅ Run complete: grid={} inverter_online={} telemetry={} stale={} events={:?} delivered {}/{}",
        report
            .grid_status
            .map_or("unknown", |status| status.as_str()),
        report.inverter_online,
        report.telemetry_available,
        report.stale,
        report.events,
        report.messages_delivered,
        report.messages_attempted
    );
    Ok(())
}
