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

//! User-facing notification text.
//!
//! `Messages` is resolved once at startup for the configured language and handed to every
//! component that talks to subscribers.

use crate::duration::DurationParts;
use chrono::TimeDelta;
use gridwatch_i18n::{FluentArgs, I18n, I18nError, Language};
use gridwatch_types::StatusSnapshot;
use tracing::warn;

#[derive(Debug)]
pub struct Messages {
    i18n: I18n,
}

impl Messages {
    pub fn new(i18n: I18n) -> Self {
        Self { i18n }
    }

    pub fn for_language(language: Language) -> Result<Self, I18nError> {
        Ok(Self::new(I18n::new(language)?))
    }

    /// Inverter stopped refreshing its data
    #[must_use]
    pub fn inverter_stale(&self, time: &str, stale_after: TimeDelta) -> String {
        let mut args = FluentArgs::new();
        args.set("time", time.to_owned());
        args.set("minutes", stale_after.num_minutes());
        self.render("inverter-stale", &args)
    }

    #[must_use]
    pub fn inverter_back_online(&self, time: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("time", time.to_owned());
        self.render("inverter-back-online", &args)
    }

    /// Telemetry API could not be reached or returned garbage
    #[must_use]
    pub fn inverter_unavailable(&self, time: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("time", time.to_owned());
        self.render("inverter-unavailable", &args)
    }

    #[must_use]
    pub fn grid_off(&self, time: &str, reading: &StatusSnapshot) -> String {
        self.render("grid-off", &Self::reading_args(time, reading))
    }

    /// Grid restored; `outage` is appended when the outage start is known
    #[must_use]
    pub fn grid_on(&self, time: &str, outage: Option<TimeDelta>, reading: &StatusSnapshot) -> String {
        let suffix = match outage {
            Some(delta) => {
                let mut suffix_args = FluentArgs::new();
                suffix_args.set("duration", self.duration(delta));
                self.render("outage-duration-suffix", &suffix_args)
            }
            None => String::new(),
        };

        let mut args = Self::reading_args(time, reading);
        args.set("duration", suffix);
        self.render("grid-on", &args)
    }

    /// Human-readable duration, e.g. "3 hours" or "2 minutes 5 seconds"
    #[must_use]
    pub fn duration(&self, delta: TimeDelta) -> String {
        let parts = DurationParts::from_delta(delta);
        let mut pieces = Vec::with_capacity(3);
        if parts.hours != 0 {
            pieces.push(self.render_count("duration-hours", "hours", parts.hours));
        }
        if parts.minutes != 0 {
            pieces.push(self.render_count("duration-minutes", "minutes", parts.minutes));
        }
        if parts.shows_seconds() {
            pieces.push(self.render_count("duration-seconds", "seconds", parts.seconds));
        }

        if pieces.is_empty() {
            return self.render("duration-zero", &FluentArgs::new());
        }
        pieces.join(" ")
    }

    #[must_use]
    pub fn subscribe_confirmation(&self) -> String {
        self.render("subscribe-confirmation", &FluentArgs::new())
    }

    fn reading_args(time: &str, reading: &StatusSnapshot) -> FluentArgs<'static> {
        let mut args = FluentArgs::new();
        args.set("time", time.to_owned());
        args.set("soc", reading.state_of_charge);
        args.set("acpower", reading.ac_power_w);
        args.set("feedin", reading.feed_in_power_w);
        args
    }

    fn render_count(&self, key: &str, arg: &'static str, value: i64) -> String {
        let mut args = FluentArgs::new();
        args.set(arg, value);
        self.render(key, &args)
    }

    fn render(&self, key: &str, args: &FluentArgs<'_>) -> String {
        match self.i18n.format(key, Some(args)) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to render message {key}: {e}");
                key.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Messages {
        Messages::for_language(Language::English).unwrap()
    }

    fn reading(soc: f64, ac: f64, feed_in: f64) -> StatusSnapshot {
        StatusSnapshot {
            feed_in_power_w: feed_in,
            ac_power_w: ac,
            state_of_charge: soc,
            upload_time: None,
        }
    }

    #[test]
    fn test_duration_hours_suppress_seconds() {
        let messages = english();
        assert_eq!(
            messages.duration(TimeDelta::seconds(3 * 3600 + 5)),
            "3 hours"
        );
        assert_eq!(
            messages.duration(TimeDelta::seconds(3600 + 60 + 1)),
            "1 hour 1 minute"
        );
    }

    #[test]
    fn test_duration_short_outage_has_seconds() {
        let messages = english();
        assert_eq!(
            messages.duration(TimeDelta::seconds(2 * 60 + 5)),
            "2 minutes 5 seconds"
        );
        assert_eq!(messages.duration(TimeDelta::seconds(42)), "42 seconds");
    }

    #[test]
    fn test_duration_zero() {
        let messages = english();
        assert_eq!(messages.duration(TimeDelta::zero()), "0 seconds");
        assert_eq!(messages.duration(TimeDelta::milliseconds(400)), "0 seconds");
    }

    #[test]
    fn test_grid_off_text() {
        let text = english().grid_off("18.10.2025 21:00:00", &reading(80.0, 500.0, 0.0));
        assert_eq!(
            text,
            "⚠️ Power went out! ⏰ 18.10.2025 21:00:00\nSOC: 80% | Home: 500W | Grid: 0W"
        );
    }

    #[test]
    fn test_grid_on_with_and_without_duration() {
        let messages = english();
        let reading = reading(64.0, 350.0, -1200.0);

        let with = messages.grid_on(
            "18.10.2025 23:02:05",
            Some(TimeDelta::seconds(2 * 3600 + 2 * 60 + 5)),
            &reading,
        );
        assert_eq!(
            with,
            "✅ Power is back! ⏰ 18.10.2025 23:02:05 (out for 2 hours 2 minutes)\nSOC: 64% | Home: 350W | Grid: -1200W"
        );

        let without = messages.grid_on("18.10.2025 23:02:05", None, &reading);
        assert!(without.starts_with("✅ Power is back! ⏰ 18.10.2025 23:02:05\n"));
    }

    #[test]
    fn test_ukrainian_duration() {
        let messages = Messages::for_language(Language::Ukrainian).unwrap();
        assert_eq!(
            messages.duration(TimeDelta::seconds(2 * 60 + 5)),
            "2 хвилини 5 секунд"
        );
    }
}
