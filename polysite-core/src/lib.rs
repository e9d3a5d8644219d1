//! # polysite-core
//!
//! Core library for the polysite content layer.
//!
//! This crate provides the building blocks that sit between the headless
//! CMS and the site templates: flattening CMS responses, rendering article
//! Markdown with stable heading anchors, and resolving UI strings and
//! media URLs for each locale.

pub mod config;
pub mod i18n;
pub mod markdown;
pub mod media;
pub mod models;
pub mod normalize;
pub mod slug;

pub use config::Config;
pub use i18n::Translations;
pub use markdown::{
    excerpt, extract_headings, reading_time, MarkdownRenderer, RenderedDocument,
    DEFAULT_EXCERPT_LENGTH,
};
pub use media::image_url;
pub use models::{Article, Author, Category, Media};
pub use normalize::{normalize, CmsResponse};
pub use slug::{slugify, SlugRegistry};
