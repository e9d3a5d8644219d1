//! Heading slug generation and per-document de-duplication.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Maximum length of a base slug, in characters
pub const MAX_SLUG_LEN: usize = 50;

/// Slug used when nothing survives sanitization
pub const FALLBACK_SLUG: &str = "section";

static DISALLOWED_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static HYPHENS_REGEX: OnceLock<Regex> = OnceLock::new();

fn disallowed_regex() -> &'static Regex {
    // ASCII word characters, whitespace, Hiragana, Katakana, CJK ideographs, hyphen
    DISALLOWED_REGEX.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_\s\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FAF}-]").unwrap()
    })
}

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn hyphens_regex() -> &'static Regex {
    HYPHENS_REGEX.get_or_init(|| Regex::new(r"-+").unwrap())
}

/// Convert heading text to an anchor-safe base slug
///
/// Rules:
/// - Lowercase and trim
/// - Remove everything except ASCII word characters, whitespace, kana,
///   CJK ideographs, and hyphens
/// - Replace whitespace runs with hyphens and collapse repeated hyphens
/// - Trim leading/trailing hyphens
/// - Truncate to 50 characters
/// - Fall back to `section` when empty
///
/// # Examples
///
/// ```
/// use polysite_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("はじめに"), "はじめに");
/// assert_eq!(slugify("!!!"), "section");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();
    let trimmed = lowercased.trim();

    let cleaned = disallowed_regex().replace_all(trimmed, "");
    let with_hyphens = whitespace_regex().replace_all(&cleaned, "-");
    let collapsed = hyphens_regex().replace_all(&with_hyphens, "-");

    let slug: String = collapsed
        .trim_matches('-')
        .chars()
        .take(MAX_SLUG_LEN)
        .collect();

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Tracks the ids already handed out within one document.
///
/// A registry must be created fresh for every document: sharing one
/// across documents would suffix ids that never collide on the page.
#[derive(Debug, Default, Clone)]
pub struct SlugRegistry {
    /// Last suffix tried per base slug
    counters: HashMap<String, usize>,
    /// Every id returned so far, suffixed or not
    taken: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and make the result unique within this registry.
    ///
    /// The first occurrence of a base slug is returned as-is; later
    /// occurrences get the next free `-N` suffix, starting at `-2`. A
    /// suffixed id never collides with a heading whose own text slugs to
    /// the same string.
    pub fn unique_slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        if self.taken.insert(base.clone()) {
            self.counters.entry(base.clone()).or_insert(1);
            return base;
        }

        let counter = self.counters.entry(base.clone()).or_insert(1);
        loop {
            *counter += 1;
            let candidate = format!("{}-{}", base, counter);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Number of ids handed out so far
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Getting Started"), "getting-started");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Rust & Safety"), "rust-safety");
        assert_eq!(slugify("C++ Programming"), "c-programming");
        assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
        assert_eq!(slugify("What's new?"), "whats-new");
    }

    #[test]
    fn test_underscores_are_kept() {
        assert_eq!(slugify("snake_case_name"), "snake_case_name");
    }

    #[test]
    fn test_japanese_and_cjk() {
        assert_eq!(slugify("はじめに"), "はじめに");
        assert_eq!(slugify("カタカナ 見出し"), "カタカナ-見出し");
        assert_eq!(slugify("使い方（基本）"), "使い方基本");
    }

    #[test]
    fn test_non_ascii_latin_is_stripped() {
        assert_eq!(slugify("Café Crème"), "caf-crme");
        assert_eq!(slugify("한국어"), "section");
    }

    #[test]
    fn test_whitespace_and_hyphens() {
        assert_eq!(slugify("  Hello    World  "), "hello-world");
        assert_eq!(slugify("-Leading Hyphen"), "leading-hyphen");
        assert_eq!(slugify("a - - b"), "a-b");
    }

    #[test]
    fn test_truncation() {
        let long = "a".repeat(80);
        assert_eq!(slugify(&long).chars().count(), MAX_SLUG_LEN);

        let long_kana = "あ".repeat(60);
        assert_eq!(slugify(&long_kana).chars().count(), MAX_SLUG_LEN);
    }

    #[test]
    fn test_fallback_for_empty() {
        assert_eq!(slugify(""), "section");
        assert_eq!(slugify("!!!"), "section");
        assert_eq!(slugify("   "), "section");
    }

    #[test]
    fn test_registry_dedupes() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique_slug("Overview"), "overview");
        assert_eq!(registry.unique_slug("Overview"), "overview-2");
        assert_eq!(registry.unique_slug("Details"), "details");
        assert_eq!(registry.unique_slug("overview"), "overview-3");
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_suffix_never_reuses_an_existing_id() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique_slug("A"), "a");
        assert_eq!(registry.unique_slug("A"), "a-2");
        assert_eq!(registry.unique_slug("A 2"), "a-2-2");
        assert_eq!(registry.unique_slug("A"), "a-3");
    }

    #[test]
    fn test_suffix_skips_ids_taken_by_earlier_headings() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique_slug("Step 2"), "step-2");
        assert_eq!(registry.unique_slug("Step"), "step");
        assert_eq!(registry.unique_slug("Step"), "step-3");
    }

    #[test]
    fn test_registry_fallback_dedupes() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique_slug("???"), "section");
        assert_eq!(registry.unique_slug("!!!"), "section-2");
    }

    #[test]
    fn test_fresh_registries_are_independent() {
        let mut first = SlugRegistry::new();
        let mut second = SlugRegistry::new();
        assert_eq!(first.unique_slug("Intro"), "intro");
        assert_eq!(second.unique_slug("Intro"), "intro");
        assert!(!second.is_empty());
    }
}
