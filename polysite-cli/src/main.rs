//! # polysite CLI
//!
//! Command-line interface for the polysite content layer.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use polysite_core::DEFAULT_EXCERPT_LENGTH;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polysite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "polysite.yml")]
    config: PathBuf,

    /// CMS base URL (overrides cms.url from the config file)
    #[arg(long, env = "POLYSITE_CMS_URL")]
    cms_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file to HTML with headings, reading time, and excerpt
    Render {
        /// Markdown file
        file: PathBuf,

        /// Locale used for the reading-time estimate
        #[arg(long)]
        locale: Option<String>,

        /// Maximum excerpt length in characters
        #[arg(long, default_value_t = DEFAULT_EXCERPT_LENGTH)]
        excerpt_length: usize,
    },

    /// Print the heading outline of a Markdown file
    Headings {
        /// Markdown file
        file: PathBuf,
    },

    /// List articles from the CMS
    Articles {
        /// Locale code (defaults to site.default_locale)
        #[arg(long)]
        locale: Option<String>,

        /// Only articles in this category (slug)
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of articles
        #[arg(long)]
        limit: Option<u32>,

        /// Sort as FIELD or FIELD:asc|desc
        #[arg(long)]
        sort: Option<String>,
    },

    /// List categories from the CMS
    Categories {
        /// Locale code (defaults to site.default_locale)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Every category with its newest articles
    Glimpse {
        /// Locale code (defaults to site.default_locale)
        #[arg(long)]
        locale: Option<String>,

        /// Articles per category
        #[arg(long, default_value_t = 3)]
        per_category: u32,
    },

    /// Resolve a UI string and print it as plain text
    T {
        /// String key (e.g. nav.home)
        key: String,

        /// Locale code (defaults to site.default_locale)
        #[arg(long)]
        locale: Option<String>,

        /// Placeholder values as name=value
        #[arg(long = "arg")]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing on stderr so stdout stays machine-readable
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = commands::load_config(&cli.config, cli.cms_url.as_deref())?;

    match cli.command {
        Commands::Render {
            file,
            locale,
            excerpt_length,
        } => {
            let locale = commands::resolve_locale(&config, locale.as_deref());
            commands::render_file(&file, locale, excerpt_length)
        }
        Commands::Headings { file } => commands::show_headings(&file),
        Commands::Articles {
            locale,
            category,
            limit,
            sort,
        } => {
            let opts = commands::ArticleOptions {
                locale: commands::resolve_locale(&config, locale.as_deref()),
                category,
                limit,
                sort,
            };
            commands::list_articles(&config, opts).await
        }
        Commands::Categories { locale } => {
            let locale = commands::resolve_locale(&config, locale.as_deref());
            commands::list_categories(&config, locale).await
        }
        Commands::Glimpse {
            locale,
            per_category,
        } => {
            let locale = commands::resolve_locale(&config, locale.as_deref());
            commands::glimpse(&config, locale, per_category).await
        }
        Commands::T { key, locale, args } => {
            let locale = commands::resolve_locale(&config, locale.as_deref());
            commands::translate(&config, &key, locale, &args)
        }
    }
}
