//! Typed views over normalized CMS entities.

use crate::config::Config;
use crate::markdown::{excerpt, reading_time};
use crate::media::image_url;
use chrono::{DateTime, Utc};
use polysite_types::Locale;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uploaded media file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub alternative_text: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

impl Media {
    /// Page-ready URL for this media file
    pub fn url_with(&self, config: &Config) -> String {
        image_url(config, self.url.as_deref())
    }
}

/// Article author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Author {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub avatar: Option<Media>,
}

/// Article category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Category {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub cover: Option<Media>,
}

/// A published article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub slug: String,

    /// Editor-supplied summary
    #[serde(default)]
    pub description: Option<String>,

    /// Markdown body
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub cover: Option<Media>,

    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub author: Option<Author>,
}

impl Article {
    /// Locale of the article, falling back to the default locale
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::parse_or_default)
            .unwrap_or_default()
    }

    /// Estimated minutes to read the body
    pub fn reading_time(&self) -> usize {
        reading_time(&self.content, self.locale())
    }

    /// Editor summary if present, otherwise an excerpt of the body
    pub fn summary(&self, max_len: usize) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => excerpt(&self.content, max_len),
        }
    }

    /// Cover image URL, or the placeholder when no cover is attached
    pub fn cover_url(&self, config: &Config) -> String {
        match &self.cover {
            Some(cover) => cover.url_with(config),
            None => image_url(config, None),
        }
    }
}

/// Deserialize a normalized entity, skipping it when malformed.
pub fn from_entity<T: DeserializeOwned>(entity: &Value) -> Option<T> {
    match serde_json::from_value(entity.clone()) {
        Ok(typed) => Some(typed),
        Err(e) => {
            tracing::debug!("Skipping malformed entity {}: {}", entity["id"], e);
            None
        }
    }
}

/// Deserialize every well-formed entity in a list
pub fn from_entities<'a, T, I>(entities: I) -> Vec<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = &'a Value>,
{
    entities.into_iter().filter_map(from_entity::<T>).collect()
}
