//! UI string tables and locale-aware lookup.

use polysite_types::Locale;
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationsError {
    #[error("Failed to read string table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Per-locale UI strings keyed by dotted path (e.g. "nav.home")
#[derive(Debug, Clone, Default)]
pub struct Translations {
    default_locale: Locale,
    tables: HashMap<Locale, HashMap<String, String>>,
}

impl Translations {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            tables: HashMap::new(),
        }
    }

    /// Load string tables from a YAML file
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        default_locale: Locale,
    ) -> Result<Self, TranslationsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents, default_locale)
    }

    /// Parse string tables of the form `{ <locale>: { <key>: <string> } }`.
    ///
    /// Nested mappings are flattened to dotted keys. Sections for locales
    /// the site does not publish are skipped.
    pub fn from_yaml(contents: &str, default_locale: Locale) -> Result<Self, TranslationsError> {
        let root: HashMap<String, Value> = serde_yaml::from_str(contents)?;
        let mut translations = Self::new(default_locale);

        for (code, table) in root {
            let Some(locale) = Locale::from_code(&code) else {
                tracing::warn!("Ignoring strings for unsupported locale '{}'", code);
                continue;
            };

            let entries = translations.tables.entry(locale).or_default();
            flatten_into(entries, "", &table);
        }

        Ok(translations)
    }

    /// Add or replace a single string
    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, value: impl Into<String>) {
        self.tables
            .entry(locale)
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Look up a string without any fallback
    pub fn get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.tables
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Resolve a UI string.
    ///
    /// Falls back to the default locale, then to the key itself.
    ///
    /// # Example
    ///
    /// ```
    /// use polysite_core::i18n::Translations;
    /// use polysite_types::Locale;
    ///
    /// let strings = Translations::from_yaml(
    ///     "en:\n  nav:\n    home: Home\nja:\n  nav:\n    home: ホーム\n",
    ///     Locale::En,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(strings.t(Locale::Ja, "nav.home"), "ホーム");
    /// assert_eq!(strings.t(Locale::Fr, "nav.home"), "Home");
    /// assert_eq!(strings.t(Locale::Fr, "nav.missing"), "nav.missing");
    /// ```
    pub fn t<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        if let Some(value) = self.get(locale, key) {
            return value;
        }
        if let Some(value) = self.get(self.default_locale, key) {
            return value;
        }
        tracing::debug!("Missing UI string '{}' for locale {}", key, locale);
        key
    }

    /// Resolve a UI string and substitute `{name}` placeholders
    pub fn t_with(&self, locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
        let mut resolved = self.t(locale, key).to_string();
        for (name, value) in args {
            resolved = resolved.replace(&format!("{{{}}}", name), value);
        }
        resolved
    }

    /// Locales that have at least one string
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.tables.keys().copied().collect();
        locales.sort();
        locales
    }
}

fn flatten_into(entries: &mut HashMap<String, String>, prefix: &str, value: &Value) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(key) = scalar_to_string(key) else {
                    continue;
                };
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(entries, &path, child);
            }
        }
        other => {
            if let Some(text) = scalar_to_string(other) {
                if !prefix.is_empty() {
                    entries.insert(prefix.to_string(), text);
                }
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
