//! Shared types for polysite
//!
//! This crate provides the small value types used across the polysite
//! crates: the supported site locales, heading outline entries, and sort
//! directions for CMS queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported site locale
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
    Zh,
    Ko,
    Es,
    Fr,
    De,
    Pt,
}

impl Locale {
    /// Every locale the site is published in, default first
    pub const ALL: [Locale; 8] = [
        Locale::En,
        Locale::Ja,
        Locale::Zh,
        Locale::Ko,
        Locale::Es,
        Locale::Fr,
        Locale::De,
        Locale::Pt,
    ];

    /// Look up a locale by code.
    ///
    /// Matching is case-insensitive and only the primary subtag is
    /// considered, so `ja-JP` and `pt_BR` resolve to `ja` and `pt`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "en" => Some(Locale::En),
            "ja" => Some(Locale::Ja),
            "zh" => Some(Locale::Zh),
            "ko" => Some(Locale::Ko),
            "es" => Some(Locale::Es),
            "fr" => Some(Locale::Fr),
            "de" => Some(Locale::De),
            "pt" => Some(Locale::Pt),
            _ => None,
        }
    }

    /// Look up a locale by code, falling back to the default locale
    pub fn parse_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
            Locale::Zh => "zh",
            Locale::Ko => "ko",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Pt => "pt",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heading in a document outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading depth (1-3)
    pub level: u8,
    /// Visible heading text with inline markup removed
    pub text: String,
    /// Anchor id, unique within the document
    pub id: String,
}

/// Sort direction for CMS queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_code() {
        assert_eq!(Locale::from_code("ja"), Some(Locale::Ja));
        assert_eq!(Locale::from_code("JA"), Some(Locale::Ja));
        assert_eq!(Locale::from_code("ja-JP"), Some(Locale::Ja));
        assert_eq!(Locale::from_code("pt_BR"), Some(Locale::Pt));
        assert_eq!(Locale::from_code("xx"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_unknown_locale_falls_back_to_default() {
        assert_eq!(Locale::parse_or_default("klingon"), Locale::En);
        assert_eq!(Locale::parse_or_default("fr"), Locale::Fr);
    }

    #[test]
    fn test_locale_roundtrip_codes() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_code(locale.as_str()), Some(locale));
        }
        assert_eq!(Locale::ALL[0], Locale::default());
    }

    #[test]
    fn test_sort_order_conversion() {
        assert_eq!(SortOrder::from_str("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::from_str("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::from_str("sideways"), None);
    }
}
