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

//! Grid power watcher core: status classification, transition detection, notification
//! fan-out, persisted state and subscriber registration.

pub mod broadcast;
pub mod classifier;
pub mod duration;
pub mod engine;
pub mod error;
mod json_file;
pub mod messages;
pub mod monitor;
pub mod registration;
pub mod state_store;
pub mod subscriber_store;
pub mod traits;

pub use broadcast::SubscriberBroadcast;
pub use classifier::{DEFAULT_STALE_AFTER, classify_grid, is_stale};
pub use engine::{Evaluation, Notice, Observation, TransitionEngine};
pub use error::{StoreError, StoreResult};
pub use messages::Messages;
pub use monitor::{CycleReport, Monitor};
pub use registration::{RegistrationListener, RegistrationReport, is_subscribe_command};
pub use state_store::StateStore;
pub use subscriber_store::SubscriberStore;
pub use traits::{DeliveryReport, MessagingBackend, NotificationSink, TelemetrySource};
