//! Render a local Markdown file the way article bodies are rendered.

use crate::output::print_json;
use anyhow::{Context, Result};
use polysite_core::{extract_headings, MarkdownRenderer};
use polysite_types::Locale;
use std::path::Path;

/// Render a Markdown file and print HTML plus derived metadata
pub fn render_file(path: &Path, locale: Locale, excerpt_len: usize) -> Result<()> {
    let markdown = read_markdown(path)?;

    let renderer = MarkdownRenderer::new();
    let document = renderer.render_document(&markdown, locale, excerpt_len);

    tracing::debug!(
        "Rendered {:?}: {} headings, {} min",
        path,
        document.headings.len(),
        document.reading_time
    );

    print_json("document.rendered", document)
}

/// Print the h1-h3 outline of a Markdown file
pub fn show_headings(path: &Path) -> Result<()> {
    let markdown = read_markdown(path)?;
    print_json("document.headings", extract_headings(&markdown))
}

fn read_markdown(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}
