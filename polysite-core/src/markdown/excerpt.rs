//! Plain-text excerpts and reading-time estimates for article bodies.

use polysite_types::Locale;
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Default maximum excerpt length, in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 160;

/// Appended to excerpts that were cut short
pub const ELLIPSIS: char = '…';

/// Reading speed for whitespace-delimited languages
pub const WORDS_PER_MINUTE: usize = 200;

/// Reading speed for Japanese, counted in characters
pub const JA_CHARS_PER_MINUTE: usize = 400;

static PLAIN_TEXT_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn plain_text_patterns() -> &'static [(Regex, &'static str)] {
    PLAIN_TEXT_PATTERNS.get_or_init(|| {
        [
            (r"(?s)```.*?```", " "),
            (r"(?m)^#{1,6}\s+", ""),
            (r"\*\*(.+?)\*\*", "$1"),
            (r"\b__(.+?)__\b", "$1"),
            (r"\*(.+?)\*", "$1"),
            (r"\b_(.+?)_\b", "$1"),
            (r"!\[([^\]]*)\]\([^)]*\)", "$1"),
            (r"\[([^\]]+)\]\([^)]*\)", "$1"),
            (r"`([^`]+)`", "$1"),
            (r"<[^>]+>", ""),
        ]
        .into_iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
        .collect()
    })
}

/// Strip Markdown syntax and collapse whitespace
pub fn plain_text(markdown: &str) -> String {
    let mut text = markdown.to_string();
    for (regex, replacement) in plain_text_patterns() {
        text = regex.replace_all(&text, *replacement).into_owned();
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build a plain-text excerpt of at most `max_len` characters.
///
/// Text that already fits is returned verbatim. Longer text is cut at
/// the last word boundary before `max_len` and gets a trailing `…`.
///
/// # Example
///
/// ```
/// use polysite_core::markdown::excerpt;
///
/// assert_eq!(excerpt("## Hello **world**", 160), "Hello world");
/// assert_eq!(excerpt("one two three four", 10), "one two…");
/// ```
pub fn excerpt(markdown: &str, max_len: usize) -> String {
    let text = plain_text(markdown);
    truncate_at_word(&text, max_len)
}

fn truncate_at_word(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    // Whole grapheme clusters only, so combining marks stay with their base
    let mut end = 0;
    let mut taken = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let width = grapheme.chars().count();
        if taken + width > max_len {
            break;
        }
        taken += width;
        end = offset + grapheme.len();
    }

    let cut = &text[..end];
    let breaks_cleanly = text[end..].starts_with(char::is_whitespace);

    let kept = if breaks_cleanly {
        cut
    } else {
        match cut.rfind(char::is_whitespace) {
            Some(last_space) if last_space > 0 => &cut[..last_space],
            _ => cut,
        }
    };

    let mut result = kept.trim_end().to_string();
    result.push(ELLIPSIS);
    result
}

/// Estimate reading time in whole minutes.
///
/// Japanese text is measured in non-whitespace characters, every other
/// locale in whitespace-delimited words. Empty text takes 0 minutes.
pub fn reading_time(text: &str, locale: Locale) -> usize {
    match locale {
        Locale::Ja => text
            .chars()
            .filter(|c| !c.is_whitespace())
            .count()
            .div_ceil(JA_CHARS_PER_MINUTE),
        _ => text.split_whitespace().count().div_ceil(WORDS_PER_MINUTE),
    }
}
