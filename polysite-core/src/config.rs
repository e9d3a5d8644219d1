//! Configuration parsing and management.

use polysite_types::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Main configuration struct matching the polysite.yml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cms: CmsConfig,

    #[serde(default)]
    pub site: SiteConfig,

    /// YAML file holding the UI string tables
    #[serde(default)]
    pub strings: Option<PathBuf>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    #[serde(default = "default_cms_url")]
    pub url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_cms_url() -> String {
    String::from("http://localhost:1337")
}

fn default_page_size() -> u32 {
    25
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub default_locale: Locale,

    /// Image path used when an entity has no media attached
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_placeholder_image() -> String {
    String::from("/images/placeholder.svg")
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: default_cms_url(),
            token: None,
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        if config.cms.url.trim().is_empty() {
            return Err(ConfigError::MissingField("cms.url".to_string()));
        }
        Ok(config)
    }

    /// Load configuration if the file exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// CMS base URL without a trailing slash
    pub fn cms_base_url(&self) -> &str {
        self.cms.url.trim_end_matches('/')
    }

    /// Get the string table file, resolved relative to config file
    pub fn strings_path(&self) -> Option<PathBuf> {
        self.strings.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}
