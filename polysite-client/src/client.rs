//! Soft-failing CMS content client.

use crate::error::{FetchError, Result};
use crate::query::{ContentQuery, Resource};
use futures::future::join_all;
use polysite_core::models::{from_entities, from_entity};
use polysite_core::{Article, Category, CmsResponse, Config};
use polysite_types::{Locale, SortOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// A category with a handful of its latest articles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGlimpse {
    pub category: Category,
    pub articles: Vec<Article>,
}

/// Read-only client for the headless CMS.
///
/// Every read soft-fails: transport errors, error statuses, and
/// undecodable bodies are logged and turned into an empty result, so an
/// empty response means either "nothing there" or "fetch failed".
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    page_size: u32,
}

impl CmsClient {
    /// Create a client from the `cms` section of the configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.cms.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.cms_base_url().to_string(),
            token: config.cms.token.clone(),
            page_size: config.cms.page_size,
        })
    }

    /// Fetch and normalize a collection, degrading to an empty result
    pub async fn fetch(&self, resource: Resource, query: &ContentQuery) -> CmsResponse {
        match self.try_fetch(resource, query).await {
            Ok(response) => response.normalized(),
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", resource.as_str(), e);
                CmsResponse::empty()
            }
        }
    }

    async fn try_fetch(&self, resource: Resource, query: &ContentQuery) -> Result<CmsResponse> {
        let url = format!("{}{}", self.base_url, resource.path());

        let mut query = query.clone();
        if query.page_size.is_none() {
            query.page_size = Some(self.page_size);
        }
        let pairs = query.to_pairs(resource);

        tracing::debug!("GET {} ({} params)", url, pairs.len());

        let mut request = self.http.get(&url).query(&pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response
            .json::<CmsResponse>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }

    pub async fn articles(&self, query: &ContentQuery) -> CmsResponse {
        self.fetch(Resource::Articles, query).await
    }

    pub async fn categories(&self, query: &ContentQuery) -> CmsResponse {
        self.fetch(Resource::Categories, query).await
    }

    /// Articles deserialized into [`Article`], skipping malformed entries
    pub async fn articles_typed(&self, query: &ContentQuery) -> Vec<Article> {
        let response = self.articles(query).await;
        from_entities(response.entities())
    }

    /// Categories deserialized into [`Category`], skipping malformed entries
    pub async fn categories_typed(&self, query: &ContentQuery) -> Vec<Category> {
        let response = self.categories(query).await;
        from_entities(response.entities())
    }

    pub async fn article_by_slug(&self, locale: Locale, slug: &str) -> Option<Value> {
        let query = ContentQuery::new(locale).filter("slug", slug).page_size(1);
        first_entity(self.articles(&query).await)
    }

    pub async fn category_by_slug(&self, locale: Locale, slug: &str) -> Option<Value> {
        let query = ContentQuery::new(locale).filter("slug", slug).page_size(1);
        first_entity(self.categories(&query).await)
    }

    /// Newest articles in a category
    pub async fn articles_by_category(
        &self,
        locale: Locale,
        category_slug: &str,
        limit: u32,
    ) -> CmsResponse {
        let query = ContentQuery::new(locale)
            .filter("category.slug", category_slug)
            .sort("publishedAt", SortOrder::Desc)
            .page_size(limit);
        self.articles(&query).await
    }

    /// Newest articles across all categories
    pub async fn latest_articles(&self, locale: Locale, limit: u32) -> CmsResponse {
        let query = ContentQuery::new(locale)
            .sort("publishedAt", SortOrder::Desc)
            .page_size(limit);
        self.articles(&query).await
    }

    /// Every category with up to `per_category` of its newest articles.
    ///
    /// Per-category fetches run concurrently; a failed fetch leaves that
    /// category with no articles.
    pub async fn category_glimpses(
        &self,
        locale: Locale,
        per_category: u32,
    ) -> Vec<CategoryGlimpse> {
        let categories = self
            .categories_typed(&ContentQuery::new(locale).sort("name", SortOrder::Asc))
            .await;

        let fetches = categories.iter().map(|category| async move {
            let response = self
                .articles_by_category(locale, &category.slug, per_category)
                .await;
            let articles: Vec<Article> = from_entities(response.entities());
            (category.id, articles)
        });

        let mut by_category: HashMap<u64, Vec<Article>> =
            join_all(fetches).await.into_iter().collect();

        categories
            .into_iter()
            .map(|category| {
                let articles = by_category.remove(&category.id).unwrap_or_default();
                CategoryGlimpse { category, articles }
            })
            .collect()
    }
}

fn first_entity(response: CmsResponse) -> Option<Value> {
    match response.data {
        Value::Array(items) => items.into_iter().next(),
        Value::Null => None,
        single => Some(single),
    }
}

/// Deserialize a single normalized entity, if present and well-formed
pub fn typed<T: serde::de::DeserializeOwned>(entity: Option<Value>) -> Option<T> {
    entity.as_ref().and_then(from_entity)
}
