//! CMS content queries.

use crate::output::print_json;
use anyhow::{bail, Context, Result};
use polysite_client::{CmsClient, ContentQuery, Sort};
use polysite_core::Config;
use polysite_types::Locale;

#[derive(Debug, Clone)]
pub struct ArticleOptions {
    pub locale: Locale,
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

fn client(config: &Config) -> Result<CmsClient> {
    CmsClient::new(config).context("Failed to create CMS client")
}

/// List articles, optionally filtered by category
pub async fn list_articles(config: &Config, opts: ArticleOptions) -> Result<()> {
    let mut query = ContentQuery::new(opts.locale);

    if let Some(category) = &opts.category {
        query = query.filter("category.slug", category.as_str());
    }
    if let Some(limit) = opts.limit {
        query = query.page_size(limit);
    }
    if let Some(raw) = &opts.sort {
        let Some(sort) = Sort::parse(raw) else {
            bail!("Invalid sort '{}', expected FIELD or FIELD:asc|desc", raw);
        };
        query.sort = Some(sort);
    }

    tracing::info!("Fetching articles from {}", config.cms_base_url());
    let response = client(config)?.articles(&query).await;
    tracing::info!("Fetched {} articles", response.entities().len());

    print_json("articles.list", response)
}

/// List categories
pub async fn list_categories(config: &Config, locale: Locale) -> Result<()> {
    tracing::info!("Fetching categories from {}", config.cms_base_url());
    let response = client(config)?
        .categories(&ContentQuery::new(locale))
        .await;

    print_json("categories.list", response)
}

/// Every category with its newest articles
pub async fn glimpse(config: &Config, locale: Locale, per_category: u32) -> Result<()> {
    let glimpses = client(config)?
        .category_glimpses(locale, per_category)
        .await;
    tracing::info!("Collected {} category glimpses", glimpses.len());

    print_json("categories.glimpse", glimpses)
}
