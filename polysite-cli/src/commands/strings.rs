//! UI string lookup.

use anyhow::{bail, Context, Result};
use polysite_core::{Config, Translations};
use polysite_types::Locale;

/// Resolve one UI string and print it
pub fn translate(config: &Config, key: &str, locale: Locale, args: &[String]) -> Result<()> {
    let Some(path) = config.strings_path() else {
        bail!("No `strings` file configured");
    };

    let translations = Translations::from_file(&path, config.site.default_locale)
        .with_context(|| format!("Failed to load strings from {:?}", path))?;

    let pairs = parse_args(args)?;
    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    println!("{}", translations.t_with(locale, key, &borrowed));
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
            _ => bail!("Invalid argument '{}', expected name=value", arg),
        })
        .collect()
}
