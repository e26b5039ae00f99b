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

//! Transition detection over the persisted monitor state.
//!
//! The engine is synchronous and does no I/O: it takes the previous state, the observation
//! made this cycle and the current time, mutates the state (including the history log) and
//! returns the notices that must be delivered.

use crate::classifier::{DEFAULT_STALE_AFTER, classify_grid, is_stale};
use crate::messages::Messages;
use chrono::{NaiveDateTime, TimeDelta};
use gridwatch_types::{DISPLAY_TIME_FORMAT, EventKind, GridStatus, MonitorState, StatusSnapshot};
use std::sync::Arc;
use tracing::{debug, info};

/// What one poll of the telemetry API produced
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// The API answered with a reading
    Reading(StatusSnapshot),
    /// The API failed, timed out or answered with something unusable
    Unavailable,
}

/// A message to deliver, already recorded in the history log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub event: EventKind,
    pub text: String,
}

/// Result of evaluating one observation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Notices in the order they were recorded
    pub notices: Vec<Notice>,
    /// The reading was stale, grid status was not evaluated
    pub stale: bool,
    /// Grid status classified from this cycle's reading, if conclusive
    pub classified: Option<GridStatus>,
}

#[derive(Debug, Clone)]
pub struct TransitionEngine {
    messages: Arc<Messages>,
    stale_after: TimeDelta,
}

impl TransitionEngine {
    pub fn new(messages: Arc<Messages>) -> Self {
        Self {
            messages,
            stale_after: DEFAULT_STALE_AFTER,
        }
    }

    /// Override the age after which a reading counts as stale
    #[must_use]
    pub fn with_stale_after(mut self, stale_after: TimeDelta) -> Self {
        self.stale_after = stale_after;
        self
    }

    /// Apply one observation to `state`.
    pub fn evaluate(
        &self,
        state: &mut MonitorState,
        observation: &Observation,
        now: NaiveDateTime,
    ) -> Evaluation {
        let time = now.format(DISPLAY_TIME_FORMAT).to_string();
        let mut evaluation = Evaluation::default();

        let snapshot = match observation {
            Observation::Unavailable => {
                if state.inverter_online {
                    let text = self.messages.inverter_unavailable(&time);
                    Self::emit(state, &mut evaluation, now, EventKind::InverterOffline, text);
                }
                state.inverter_online = false;
                return evaluation;
            }
            Observation::Reading(snapshot) => snapshot,
        };

        if is_stale(snapshot, now, self.stale_after) {
            debug!(
                "Reading is stale: uploaded at {:?}, threshold {}m",
                snapshot.upload_time,
                self.stale_after.num_minutes()
            );
            if state.inverter_online {
                let text = self.messages.inverter_stale(&time, self.stale_after);
                Self::emit(state, &mut evaluation, now, EventKind::InverterOffline, text);
            }
            state.inverter_online = false;
            evaluation.stale = true;
            return evaluation;
        }

        if !state.inverter_online {
            let text = self.messages.inverter_back_online(&time);
            Self::emit(state, &mut evaluation, now, EventKind::InverterOnline, text);
        }
        state.inverter_online = true;

        let Some(current) = classify_grid(snapshot) else {
            debug!(
                "Grid status inconclusive (feed-in {}W, AC {}W)",
                snapshot.feed_in_power_w, snapshot.ac_power_w
            );
            return evaluation;
        };
        evaluation.classified = Some(current);
        debug!(
            "Grid classified as {current} (feed-in {}W, AC {}W, SOC {}%)",
            snapshot.feed_in_power_w, snapshot.ac_power_w, snapshot.state_of_charge
        );

        if let Some(previous) = state.grid_status
            && previous != current
        {
            info!("Grid transition {previous} -> {current}");
            let text = match current {
                GridStatus::Off => {
                    state.last_off_time = Some(now);
                    self.messages.grid_off(&time, snapshot)
                }
                GridStatus::On => {
                    let outage = state.last_off_time.take().map(|off| now - off);
                    self.messages.grid_on(&time, outage, snapshot)
                }
            };
            Self::emit(state, &mut evaluation, now, EventKind::for_grid(current), text);
        }

        state.grid_status = Some(current);
        evaluation
    }

    fn emit(
        state: &mut MonitorState,
        evaluation: &mut Evaluation,
        now: NaiveDateTime,
        event: EventKind,
        text: String,
    ) {
        state.record(now, event, text.clone());
        evaluation.notices.push(Notice { event, text });
    }
}
