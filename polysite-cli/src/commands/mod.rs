//! CLI command implementations.

pub mod content;
pub mod render;
pub mod strings;

pub use content::{glimpse, list_articles, list_categories, ArticleOptions};
pub use render::{render_file, show_headings};
pub use strings::translate;

use anyhow::{Context, Result};
use polysite_core::Config;
use polysite_types::Locale;
use std::path::Path;

/// Load the config file (or defaults) and apply command-line overrides
pub fn load_config(config_path: &Path, cms_url: Option<&str>) -> Result<Config> {
    tracing::debug!("Loading config from {:?}", config_path);
    let mut config =
        Config::load_or_default(config_path).context("Failed to load configuration")?;

    if let Some(url) = cms_url {
        config.cms.url = url.to_string();
    }

    Ok(config)
}

/// Pick the locale for a command.
///
/// A missing or unsupported `--locale` falls back to `site.default_locale`.
pub fn resolve_locale(config: &Config, code: Option<&str>) -> Locale {
    let default = config.site.default_locale;
    match code {
        None => default,
        Some(code) => Locale::from_code(code).unwrap_or_else(|| {
            tracing::warn!("Unsupported locale '{}', using '{}'", code, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale_uses_site_default() {
        let mut config = Config::default();
        config.site.default_locale = Locale::Ja;

        assert_eq!(resolve_locale(&config, None), Locale::Ja);
        assert_eq!(resolve_locale(&config, Some("klingon")), Locale::Ja);
        assert_eq!(resolve_locale(&config, Some("fr-CA")), Locale::Fr);
    }
}
