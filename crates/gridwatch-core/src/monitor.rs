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

//! One notifier run: load state, poll telemetry, evaluate, notify, save.

use crate::engine::{Observation, TransitionEngine};
use crate::error::StoreResult;
use crate::state_store::StateStore;
use crate::traits::{NotificationSink, TelemetrySource};
use chrono::{Datelike, NaiveDateTime};
use gridwatch_types::{EventKind, GridStatus};
use std::sync::Arc;
use tracing::{info, warn};

/// Summary of a notifier run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Events emitted this run, in order
    pub events: Vec<EventKind>,
    /// The run ended early on a stale reading
    pub stale: bool,
    pub telemetry_available: bool,
    pub grid_status: Option<GridStatus>,
    pub inverter_online: bool,
    pub messages_attempted: usize,
    pub messages_delivered: usize,
}

pub struct Monitor {
    telemetry: Arc<dyn TelemetrySource>,
    sink: Arc<dyn NotificationSink>,
    store: StateStore,
    engine: TransitionEngine,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("telemetry", &self.telemetry.name())
            .field("store", &self.store)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl Monitor {
    pub fn new(
        telemetry: Arc<dyn TelemetrySource>,
        sink: Arc<dyn NotificationSink>,
        store: StateStore,
        engine: TransitionEngine,
    ) -> Self {
        Self {
            telemetry,
            sink,
            store,
            engine,
        }
    }

    /// Run a single poll cycle as of `now` (local wall-clock time).
    ///
    /// The state file of `now`'s year is read once and written once. Telemetry and delivery
    /// failures are absorbed; only persistence errors are returned.
    pub async fn run_once(&self, now: NaiveDateTime) -> StoreResult<CycleReport> {
        let year = now.year();
        let mut state = self.store.load(year)?;

        let observation = match self.telemetry.fetch_status().await {
            Ok(snapshot) => Observation::Reading(snapshot),
            Err(e) => {
                warn!(
                    "Telemetry from {} unavailable: {e:#}",
                    self.telemetry.name()
                );
                Observation::Unavailable
            }
        };

        let evaluation = self.engine.evaluate(&mut state, &observation, now);

        let mut report = CycleReport {
            stale: evaluation.stale,
            telemetry_available: matches!(observation, Observation::Reading(_)),
            ..Default::default()
        };

        for notice in &evaluation.notices {
            info!("Sending {} notice: {}", notice.event, notice.text);
            let delivery = self.sink.broadcast(&notice.text).await;
            report.events.push(notice.event);
            report.messages_attempted += delivery.attempted;
            report.messages_delivered += delivery.delivered;
        }

        self.store.save(year, &state)?;

        report.grid_status = state.grid_status;
        report.inverter_online = state.inverter_online;
        Ok(report)
    }
}
