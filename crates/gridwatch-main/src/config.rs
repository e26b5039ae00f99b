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

//! Process configuration, read once from the environment at startup.

use chrono::TimeDelta;
use gridwatch_core::DEFAULT_STALE_AFTER;
use gridwatch_i18n::Language;
use gridwatch_telegram::DEFAULT_API_URL;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const SOLAX_API_URL: &str = "SOLAX_API_URL";
pub const SOLAX_TOKEN: &str = "SOLAX_TOKEN";
pub const SOLAX_SN: &str = "SOLAX_SN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
pub const PROJECT_LANG: &str = "PROJECT_LANG";
pub const DATA_DIR: &str = "GRIDWATCH_DATA_DIR";
pub const STALE_AFTER_MINUTES: &str = "GRIDWATCH_STALE_AFTER_MINUTES";

const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reads named variables, treating blank values as unset
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &'static str) -> ConfigResult<String> {
        self.optional(name).ok_or(ConfigError::Missing(name))
    }

    fn url(&self, name: &'static str, default: Option<&str>) -> ConfigResult<String> {
        let value = match default {
            Some(default) => self.optional(name).unwrap_or_else(|| default.to_owned()),
            None => self.required(name)?,
        };
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name,
                reason: format!("'{value}' is not an http(s) URL"),
            });
        }
        Ok(value)
    }

    fn language(&self) -> Language {
        let raw = self
            .optional(PROJECT_LANG)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_owned());
        raw.parse().unwrap_or_else(|_| {
            warn!("Unsupported language '{raw}', falling back to English");
            Language::English
        })
    }

    fn data_dir(&self) -> PathBuf {
        self.optional(DATA_DIR)
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
    }

    fn stale_after(&self) -> ConfigResult<TimeDelta> {
        let Some(raw) = self.optional(STALE_AFTER_MINUTES) else {
            return Ok(DEFAULT_STALE_AFTER);
        };
        match raw.parse::<i64>() {
            Ok(minutes) if minutes > 0 => Ok(TimeDelta::minutes(minutes)),
            Ok(_) => Err(ConfigError::Invalid {
                name: STALE_AFTER_MINUTES,
                reason: "must be at least 1 minute".to_owned(),
            }),
            Err(e) => Err(ConfigError::Invalid {
                name: STALE_AFTER_MINUTES,
                reason: format!("'{raw}': {e}"),
            }),
        }
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Bot API endpoint and credentials
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub api_url: String,
    pub token: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TelegramConfig {
    fn from_vars<F: Fn(&str) -> Option<String>>(vars: &Vars<F>) -> ConfigResult<Self> {
        Ok(Self {
            api_url: vars.url(TELEGRAM_API_URL, Some(DEFAULT_API_URL))?,
            token: vars.required(TELEGRAM_TOKEN)?,
        })
    }
}

/// Configuration of the outage notifier run
#[derive(Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    pub solax_api_url: String,
    pub solax_token: String,
    pub solax_sn: String,
    pub telegram: TelegramConfig,
    pub language: Language,
    pub data_dir: PathBuf,
    pub stale_after: TimeDelta,
}

impl std::fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("solax_api_url", &self.solax_api_url)
            .field("solax_token", &"<redacted>")
            .field("solax_sn", &self.solax_sn)
            .field("telegram", &self.telegram)
            .field("language", &self.language)
            .field("data_dir", &self.data_dir)
            .field("stale_after", &self.stale_after)
            .finish()
    }
}

impl NotifierConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };
        Ok(Self {
            solax_api_url: vars.url(SOLAX_API_URL, None)?,
            solax_token: vars.required(SOLAX_TOKEN)?,
            solax_sn: vars.required(SOLAX_SN)?,
            telegram: TelegramConfig::from_vars(&vars)?,
            language: vars.language(),
            data_dir: vars.data_dir(),
            stale_after: vars.stale_after()?,
        })
    }
}

/// Configuration of the subscriber registration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberConfig {
    pub telegram: TelegramConfig,
    pub language: Language,
    pub data_dir: PathBuf,
}

impl SubscriberConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };
        Ok(Self {
            telegram: TelegramConfig::from_vars(&vars)?,
            language: vars.language(),
            data_dir: vars.data_dir(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn notifier_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            (SOLAX_API_URL, "https://global.solaxcloud.com/api/v2"),
            (SOLAX_TOKEN, "solax-secret"),
            (SOLAX_SN, "SWTEST0001"),
            (TELEGRAM_TOKEN, "123:bot-secret"),
        ]
    }

    #[test]
    fn test_notifier_defaults() {
        let config = NotifierConfig::from_lookup(lookup(&notifier_vars())).unwrap();

        assert_eq!(config.solax_sn, "SWTEST0001");
        assert_eq!(config.telegram.api_url, DEFAULT_API_URL);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.stale_after, TimeDelta::minutes(5));
    }

    #[test]
    fn test_notifier_overrides() {
        let mut vars = notifier_vars();
        vars.extend([
            (PROJECT_LANG, "uk_UA.UTF-8"),
            (DATA_DIR, "/var/lib/gridwatch"),
            (STALE_AFTER_MINUTES, "15"),
            (TELEGRAM_API_URL, "http://localhost:8081"),
        ]);
        let config = NotifierConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.language, Language::Ukrainian);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/gridwatch"));
        assert_eq!(config.stale_after, TimeDelta::minutes(15));
        assert_eq!(config.telegram.api_url, "http://localhost:8081");
    }

    #[test]
    fn test_missing_and_blank_values() {
        let vars: Vec<_> = notifier_vars()
            .into_iter()
            .filter(|(k, _)| *k != SOLAX_SN)
            .collect();
        assert_eq!(
            NotifierConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Missing(SOLAX_SN))
        );

        let mut vars = notifier_vars();
        vars.push((TELEGRAM_TOKEN, "   "));
        // Later entries win in the map
        assert_eq!(
            NotifierConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Missing(TELEGRAM_TOKEN))
        );
    }

    #[test]
    fn test_invalid_stale_threshold() {
        for raw in ["five", "0", "-3"] {
            let mut vars = notifier_vars();
            vars.push((STALE_AFTER_MINUTES, raw));
            let err = NotifierConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name, .. } if name == STALE_AFTER_MINUTES),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_invalid_url() {
        let mut vars = notifier_vars();
        vars.push((SOLAX_API_URL, "global.solaxcloud.com"));
        let err = NotifierConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == SOLAX_API_URL));
    }

    #[test]
    fn test_unsupported_language_falls_back() {
        let mut vars = notifier_vars();
        vars.push((PROJECT_LANG, "xx_XX"));
        let config = NotifierConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn test_subscriber_needs_only_telegram() {
        let config =
            SubscriberConfig::from_lookup(lookup(&[(TELEGRAM_TOKEN, "123:bot-secret")])).unwrap();
        assert_eq!(config.telegram.token, "123:bot-secret");

        assert_eq!(
            SubscriberConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing(TELEGRAM_TOKEN))
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = NotifierConfig::from_lookup(lookup(&notifier_vars())).unwrap();
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("solax-secret"));
        assert!(!rendered.contains("bot-secret"));
        assert!(rendered.contains("SWTEST0001"));
    }
}
