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

use gridwatch_i18n::{FluentArgs, I18n, Language};

/// List of all translation keys that must exist in all languages
const REQUIRED_KEYS: &[&str] = &[
    // Inverter connectivity
    "inverter-stale",
    "inverter-back-online",
    "inverter-unavailable",
    // Grid power
    "grid-off",
    "grid-on",
    "outage-duration-suffix",
    // Durations
    "duration-hours",
    "duration-minutes",
    "duration-seconds",
    "duration-zero",
    // Registration
    "subscribe-confirmation",
];

fn full_args() -> FluentArgs<'static> {
    let mut args = FluentArgs::new();
    args.set("time", "18.10.2025 21:04:05");
    args.set("minutes", 5);
    args.set("hours", 2);
    args.set("seconds", 7);
    args.set("soc", 80);
    args.set("acpower", 500);
    args.set("feedin", 0);
    args.set("duration", "");
    args
}

#[test]
fn test_all_keys_exist_in_every_language() {
    for language in Language::ALL {
        let i18n = I18n::new(language).expect("catalog should load");
        for key in REQUIRED_KEYS {
            let result = i18n.format(key, Some(&full_args()));
            assert!(
                result.is_ok(),
                "Key '{key}' failed for language {language}: {result:?}"
            );
        }
    }
}

#[test]
fn test_english_plural_forms() {
    let i18n = I18n::new(Language::English).unwrap();

    let mut args = FluentArgs::new();
    args.set("hours", 1);
    assert_eq!(i18n.format("duration-hours", Some(&args)).unwrap(), "1 hour");

    let mut args = FluentArgs::new();
    args.set("hours", 3);
    assert_eq!(
        i18n.format("duration-hours", Some(&args)).unwrap(),
        "3 hours"
    );
}

#[test]
fn test_ukrainian_plural_forms() {
    let i18n = I18n::new(Language::Ukrainian).unwrap();

    let cases = [(1, "1 хвилина"), (3, "3 хвилини"), (5, "5 хвилин"), (21, "21 хвилина")];
    for (minutes, expected) in cases {
        let mut args = FluentArgs::new();
        args.set("minutes", minutes);
        assert_eq!(
            i18n.format("duration-minutes", Some(&args)).unwrap(),
            expected
        );
    }
}

#[test]
fn test_multiline_message_keeps_line_break() {
    let i18n = I18n::new(Language::English).unwrap();
    let mut args = FluentArgs::new();
    args.set("time", "18.10.2025 21:04:05");
    args.set("soc", 80);
    args.set("acpower", 500);
    args.set("feedin", 0);

    let text = i18n.format("grid-off", Some(&args)).unwrap();
    assert_eq!(
        text,
        "⚠️ Power went out! ⏰ 18.10.2025 21:04:05\nSOC: 80% | Home: 500W | Grid: 0W"
    );
}

#[test]
fn test_duration_suffix_keeps_leading_space() {
    let i18n = I18n::new(Language::English).unwrap();
    let mut args = FluentArgs::new();
    args.set("duration", "2 minutes 5 seconds");

    let text = i18n.format("outage-duration-suffix", Some(&args)).unwrap();
    assert_eq!(text, " (out for 2 minutes 5 seconds)");
}
