//! Markdown rendering with heading anchors, plus derived metadata.

pub mod excerpt;
pub mod headings;

use crate::slug::SlugRegistry;
use polysite_types::{Heading, Locale};
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use excerpt::{excerpt, plain_text, reading_time, DEFAULT_EXCERPT_LENGTH};
pub use headings::{extract_headings, extract_headings_with, strip_inline_markup};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write HTML: {0}")]
    Write(#[from] std::fmt::Error),
}

/// Rendered article body with its derived metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub html: String,
    pub headings: Vec<Heading>,
    pub reading_time: usize,
    pub excerpt: String,
}

/// A heading as the renderer handles it.
///
/// Parser heading events are adapted into this form once, so slugging
/// and output never depend on how the parser reported the heading.
#[derive(Debug)]
struct HeadingToken<'a> {
    level: HeadingLevel,
    inner: Vec<Event<'a>>,
    text: String,
}

impl<'a> HeadingToken<'a> {
    /// Consume events up to the matching heading end
    fn collect<I>(level: HeadingLevel, events: &mut I) -> Self
    where
        I: Iterator<Item = Event<'a>>,
    {
        let mut inner = Vec::new();
        let mut text = String::new();

        for event in events.by_ref() {
            match &event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            inner.push(event);
        }

        Self { level, inner, text }
    }

    fn depth(&self) -> u8 {
        self.level as u8
    }

    fn into_events(self, id: String) -> impl Iterator<Item = Event<'a>> {
        let start = Event::Start(Tag::Heading {
            level: self.level,
            id: Some(CowStr::from(id)),
            classes: Vec::new(),
            attrs: Vec::new(),
        });
        let end = Event::End(TagEnd::Heading(self.level));
        std::iter::once(start)
            .chain(self.inner)
            .chain(std::iter::once(end))
    }
}

/// Markdown renderer using GitHub-flavored conventions
pub struct MarkdownRenderer {
    options: Options,
}

/// Parser options shared by the renderer and the outline extractor
pub(crate) fn gfm_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_GFM);
    options
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: gfm_options(),
        }
    }

    /// Render Markdown to HTML with a fresh slug registry.
    ///
    /// On failure the original Markdown is returned unchanged.
    pub fn render(&self, markdown: &str) -> String {
        let mut registry = SlugRegistry::new();
        self.render_with(markdown, &mut registry)
    }

    /// Render Markdown to HTML using a caller-owned registry
    pub fn render_with(&self, markdown: &str, registry: &mut SlugRegistry) -> String {
        match self.try_render(markdown, registry) {
            Ok((html, _)) => html,
            Err(e) => {
                tracing::warn!("Markdown render failed, returning source: {}", e);
                markdown.to_string()
            }
        }
    }

    /// Render HTML and derive outline, reading time, and excerpt
    pub fn render_document(
        &self,
        markdown: &str,
        locale: Locale,
        excerpt_len: usize,
    ) -> RenderedDocument {
        let mut registry = SlugRegistry::new();
        let (html, headings) = match self.try_render(markdown, &mut registry) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!("Markdown render failed, returning source: {}", e);
                (markdown.to_string(), extract_headings(markdown))
            }
        };

        RenderedDocument {
            html,
            headings,
            reading_time: reading_time(markdown, locale),
            excerpt: excerpt(markdown, excerpt_len),
        }
    }

    fn try_render(
        &self,
        markdown: &str,
        registry: &mut SlugRegistry,
    ) -> Result<(String, Vec<Heading>), RenderError> {
        let mut parser = Parser::new_ext(markdown, self.options);
        let mut events: Vec<Event> = Vec::new();
        let mut headings = Vec::new();

        while let Some(event) = parser.next() {
            match event {
                Event::Start(Tag::Heading { level, .. }) if (level as u8) <= 3 => {
                    let token = HeadingToken::collect(level, &mut parser);
                    let id = registry.unique_slug(&token.text);
                    headings.push(Heading {
                        level: token.depth(),
                        text: token.text.trim().to_string(),
                        id: id.clone(),
                    });
                    events.extend(token.into_events(id));
                }
                // Single line breaks are hard breaks
                Event::SoftBreak => events.push(Event::HardBreak),
                other => events.push(other),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::write_html_fmt(&mut html_output, events.into_iter())?;

        Ok((html_output, headings))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
