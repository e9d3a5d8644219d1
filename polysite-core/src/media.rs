//! Image URL resolution for CMS media.

use crate::config::Config;

/// Resolve a CMS media URL for use in a page.
///
/// Absolute URLs are returned unchanged, relative upload paths are
/// prefixed with the CMS base URL, and a missing URL yields the
/// configured placeholder image.
///
/// # Example
///
/// ```
/// use polysite_core::{image_url, Config};
///
/// let config = Config::default();
/// assert_eq!(image_url(&config, Some("https://cdn.example.com/a.jpg")), "https://cdn.example.com/a.jpg");
/// assert_eq!(image_url(&config, Some("/uploads/a.jpg")), "http://localhost:1337/uploads/a.jpg");
/// assert_eq!(image_url(&config, None), "/images/placeholder.svg");
/// ```
pub fn image_url(config: &Config, url: Option<&str>) -> String {
    let url = match url.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => return config.site.placeholder_image.clone(),
    };

    if is_absolute(url) {
        return url.to_string();
    }

    if url.starts_with('/') {
        format!("{}{}", config.cms_base_url(), url)
    } else {
        format!("{}/{}", config.cms_base_url(), url)
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> Config {
        let mut config = Config::default();
        config.cms.url = url.to_string();
        config
    }

    #[test]
    fn test_missing_url_uses_placeholder() {
        let config = Config::default();
        assert_eq!(image_url(&config, None), "/images/placeholder.svg");
        assert_eq!(image_url(&config, Some("")), "/images/placeholder.svg");
        assert_eq!(image_url(&config, Some("   ")), "/images/placeholder.svg");
    }

    #[test]
    fn test_absolute_url_unchanged() {
        let config = config_with_url("https://cms.example.com");
        assert_eq!(image_url(&config, Some("http://x/y.jpg")), "http://x/y.jpg");
        assert_eq!(
            image_url(&config, Some("//cdn.example.com/y.jpg")),
            "//cdn.example.com/y.jpg"
        );
    }

    #[test]
    fn test_relative_url_gets_base() {
        let config = config_with_url("https://cms.example.com/");
        assert_eq!(
            image_url(&config, Some("/u/y.jpg")),
            "https://cms.example.com/u/y.jpg"
        );
        assert_eq!(
            image_url(&config, Some("u/y.jpg")),
            "https://cms.example.com/u/y.jpg"
        );
    }

    #[test]
    fn test_custom_placeholder() {
        let mut config = Config::default();
        config.site.placeholder_image = "/img/none.png".to_string();
        assert_eq!(image_url(&config, None), "/img/none.png");
    }
}
