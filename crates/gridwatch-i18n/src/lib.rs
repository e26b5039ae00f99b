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

//! Message catalogs for user-facing notification text.
//!
//! Catalogs are fluent resources embedded in the binary. Lookups go to the selected language
//! first and fall back to the English catalog, so a partially translated language still
//! produces readable messages.

pub use fluent::FluentArgs;

use fluent::FluentResource;
use fluent_bundle::concurrent::FluentBundle;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English (default)
    #[default]
    English,
    /// Ukrainian
    Ukrainian,
}

impl Language {
    /// Get the language identifier string (e.g., "en", "uk")
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Ukrainian => "uk",
        }
    }

    /// Get the language display name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Ukrainian => "Українська",
        }
    }

    /// List all supported languages
    pub const ALL: [Language; 2] = [Language::English, Language::Ukrainian];

    /// Parse language from string code
    ///
    /// # Errors
    ///
    /// Returns `I18nError::UnsupportedLanguage` if the language code is not supported.
    pub fn from_code(code: &str) -> Result<Self, I18nError> {
        match code.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "uk" | "ukrainian" | "ua" => Ok(Self::Ukrainian),
            _ => Err(I18nError::UnsupportedLanguage(code.to_owned())),
        }
    }

    /// Parse a POSIX-style locale such as `en_US`, `uk_UA.UTF-8` or `uk-UA`.
    ///
    /// Only the language part is considered; territory, encoding and modifier are ignored.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::UnsupportedLanguage` if the language part is not supported.
    pub fn from_locale(locale: &str) -> Result<Self, I18nError> {
        let language = locale
            .trim()
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default();
        Self::from_code(language).map_err(|_| I18nError::UnsupportedLanguage(locale.to_owned()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = I18nError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_locale(s)
    }
}

/// Translation errors
#[derive(Debug, Error)]
pub enum I18nError {
    /// Translation key not found
    #[error("Translation key not found: {0}")]
    KeyNotFound(String),

    /// Failed to load translation resource
    #[error("Failed to load translation resource: {0}")]
    LoadError(String),

    /// Unsupported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Formatting error
    #[error("Failed to format translation: {0}")]
    FormatError(String),
}

const DOMAIN: &str = "notifications";

/// Main i18n interface
pub struct I18n {
    language: Language,
    primary: FluentBundle<FluentResource>,
    fallback: Option<FluentBundle<FluentResource>>,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("language", &self.language)
            .field("has_fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

impl I18n {
    /// Create a new i18n instance for the specified language
    ///
    /// # Errors
    ///
    /// Returns `I18nError::LoadError` if an embedded catalog fails to parse.
    pub fn new(language: Language) -> Result<Self, I18nError> {
        let primary = Self::load_bundle(language)?;
        let fallback = if language == Language::English {
            None
        } else {
            Some(Self::load_bundle(Language::English)?)
        };

        Ok(Self {
            language,
            primary,
            fallback,
        })
    }

    fn load_bundle(language: Language) -> Result<FluentBundle<FluentResource>, I18nError> {
        let lang_code = language.code();
        let ftl_content = Self::load_ftl_file(lang_code, DOMAIN)?;

        let resource = FluentResource::try_new(ftl_content)
            .map_err(|e| I18nError::LoadError(format!("Failed to parse {DOMAIN}.ftl: {e:?}")))?;

        let lang_id: LanguageIdentifier = lang_code
            .parse()
            .map_err(|e| I18nError::LoadError(format!("Invalid language ID: {e}")))?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Chat clients render the bidi isolation marks literally
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|e| I18nError::LoadError(format!("Failed to add resource: {e:?}")))?;

        Ok(bundle)
    }

    /// Load FTL file content
    fn load_ftl_file(lang_code: &str, domain: &str) -> Result<String, I18nError> {
        match (lang_code, domain) {
            ("en", "notifications") => {
                Ok(include_str!("../locales/en/notifications.ftl").to_owned())
            }
            ("uk", "notifications") => {
                Ok(include_str!("../locales/uk/notifications.ftl").to_owned())
            }
            _ => Err(I18nError::LoadError(format!(
                "Translation file not found: {lang_code}/{domain}.ftl"
            ))),
        }
    }

    /// Get a translated string by key
    ///
    /// # Errors
    ///
    /// Returns `I18nError::KeyNotFound` if the translation key is not found in any catalog.
    pub fn get(&self, key: &str) -> Result<String, I18nError> {
        self.format(key, None)
    }

    /// Format a translated string with arguments
    ///
    /// # Errors
    ///
    /// Returns `I18nError::KeyNotFound` if the translation key is not found.
    /// Returns `I18nError::FormatError` if formatting fails.
    pub fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> Result<String, I18nError> {
        let bundles = std::iter::once(&self.primary).chain(self.fallback.as_ref());
        for bundle in bundles {
            if let Some(message) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(message, args, &mut errors);

                if !errors.is_empty() {
                    return Err(I18nError::FormatError(format!(
                        "Formatting errors in {key}: {errors:?}"
                    )));
                }

                return Ok(value.into_owned());
            }
        }

        Err(I18nError::KeyNotFound(key.to_owned()))
    }
}
