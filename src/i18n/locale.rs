// SPDX-License-Identifier: MPL-2.0
//! Startup locale selection and the catalogs bundled with the crate.

use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

use super::messages::{LocaleMessages, MessageTree};
use crate::config::Config;
use crate::error::{Error, Result};

#[derive(RustEmbed)]
#[folder = "assets/locales/"]
struct Asset;

/// Loads every bundled `<locale>.toml` catalog.
///
/// # Errors
///
/// Returns [`Error::Catalog`] when a bundled catalog does not parse.
pub fn bundled_messages() -> Result<LocaleMessages> {
    let mut messages = LocaleMessages::new();
    for file in Asset::iter() {
        let filename = file.as_ref();
        let Some(locale_str) = filename.strip_suffix(".toml") else {
            continue;
        };
        if locale_str.parse::<LanguageIdentifier>().is_err() {
            tracing::warn!(filename, "skipping bundled catalog with invalid locale name");
            continue;
        }
        if let Some(content) = Asset::get(filename) {
            let source = String::from_utf8_lossy(content.data.as_ref());
            let tree: MessageTree = toml::from_str(&source)
                .map_err(|err| Error::Catalog(format!("{filename}: {err}")))?;
            messages.insert(locale_str.to_string(), tree);
        }
    }
    Ok(messages)
}

/// Picks the startup locale: CLI, then config file, then OS locale.
///
/// Only locales in `available` are accepted.
#[must_use]
pub fn resolve_locale(
    cli_lang: Option<&str>,
    config: &Config,
    available: &[String],
) -> Option<String> {
    let accept = |candidate: &str| -> Option<String> {
        let lang = candidate.parse::<LanguageIdentifier>().ok()?;
        available
            .iter()
            .find(|locale| locale.parse::<LanguageIdentifier>().ok().as_ref() == Some(&lang))
            .cloned()
    };

    // 1. Check CLI args
    if let Some(found) = cli_lang.and_then(accept) {
        return Some(found);
    }

    // 2. Check config file
    if let Some(found) = config.language.as_deref().and_then(accept) {
        return Some(found);
    }

    // 3. Check OS locale
    sys_locale::get_locale().and_then(|os_locale| accept(&os_locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<String> {
        vec!["en-US".to_string(), "fr".to_string()]
    }

    #[test]
    fn test_resolve_locale_cli() {
        let config = Config::default();
        let lang = resolve_locale(Some("fr"), &config, &available());
        assert_eq!(lang.as_deref(), Some("fr"));
    }

    #[test]
    fn test_resolve_locale_config() {
        let config = Config {
            language: Some("fr".to_string()),
            ..Config::default()
        };
        let lang = resolve_locale(None, &config, &available());
        assert_eq!(lang.as_deref(), Some("fr"));
    }

    #[test]
    fn test_resolve_locale_skips_unavailable_cli_choice() {
        let config = Config {
            language: Some("en-US".to_string()),
            ..Config::default()
        };
        let lang = resolve_locale(Some("ja"), &config, &available());
        assert_eq!(lang.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_resolve_locale_default() {
        let config = Config::default();
        let lang = resolve_locale(None, &config, &available());
        // Depends on the OS locale of the machine running the tests.
        if let Some(l) = lang {
            assert!(available().contains(&l));
        }
    }

    #[test]
    fn bundled_catalogs_load() {
        let messages = bundled_messages().expect("bundled catalogs parse");
        assert!(messages.contains_key("en-US"));
        assert!(messages.contains_key("fr"));
    }
}
