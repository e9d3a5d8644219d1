//! Heading outline extraction from raw Markdown text.

use super::gfm_options;
use crate::slug::SlugRegistry;
use polysite_types::Heading;
use pulldown_cmark::{Event, Parser};
use regex::Regex;
use std::sync::OnceLock;

static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
static CLOSING_HASHES_REGEX: OnceLock<Regex> = OnceLock::new();

fn heading_regex() -> &'static Regex {
    HEADING_REGEX.get_or_init(|| Regex::new(r"^(#{1,3})\s+(.+)$").unwrap())
}

fn closing_hashes_regex() -> &'static Regex {
    CLOSING_HASHES_REGEX.get_or_init(|| Regex::new(r"\s+#+\s*$").unwrap())
}

/// Remove inline Markdown markup, keeping only the visible label.
///
/// The label is read back from the same inline parser the renderer uses,
/// so code spans stay literal while entities and backslash escapes are
/// decoded and inline HTML tags are dropped.
pub fn strip_inline_markup(text: &str) -> String {
    // An ATX prefix keeps block syntax such as `- ` or `> ` inside the label
    let line = format!("# {}", text.trim());
    let mut label = String::new();
    for event in Parser::new_ext(&line, gfm_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => label.push_str(&t),
            _ => {}
        }
    }
    label.trim().to_string()
}

/// Extract the h1-h3 outline of a Markdown document.
///
/// Scans the raw text line by line without rendering it, and skips
/// fenced code blocks. Ids are de-duplicated with a fresh
/// [`SlugRegistry`] so they match the anchors the renderer emits for
/// the same document.
///
/// # Example
///
/// ```
/// use polysite_core::markdown::extract_headings;
///
/// let headings = extract_headings("# Intro\n## Intro\n## Intro");
/// let ids: Vec<_> = headings.iter().map(|h| h.id.as_str()).collect();
/// assert_eq!(ids, ["intro", "intro-2", "intro-3"]);
/// ```
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut registry = SlugRegistry::new();
    extract_headings_with(markdown, &mut registry)
}

/// Extract headings using a caller-owned registry
pub fn extract_headings_with(markdown: &str, registry: &mut SlugRegistry) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut fence: Option<&str> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if let Some(marker) = fence_marker(trimmed) {
            match fence {
                Some(open) if marker == open => fence = None,
                Some(_) => {}
                None => fence = Some(marker),
            }
            continue;
        }
        if fence.is_some() {
            continue;
        }

        let Some(captures) = heading_regex().captures(line) else {
            continue;
        };

        let level = captures[1].len() as u8;
        let raw = closing_hashes_regex().replace(&captures[2], "");
        let text = strip_inline_markup(&raw);
        let id = registry.unique_slug(&text);

        headings.push(Heading { level, text, id });
    }

    headings
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}
