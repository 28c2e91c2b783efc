// SPDX-License-Identifier: MPL-2.0
//! Message rendering backed by Fluent.
//!
//! Each message is compiled on demand into a single-entry Fluent resource
//! and formatted with the caller's parameters. Messages therefore use
//! Fluent placeable syntax: `Hello { $name }`.

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use unic_langid::LanguageIdentifier;

use super::params::{ParamValue, Params};

const MESSAGE_ID: &str = "message";

/// Returns the Fluent language identifier for a locale tag, `und` if it does not parse.
#[must_use]
pub fn language_identifier(locale: &str) -> LanguageIdentifier {
    locale.parse().unwrap_or_default()
}

/// Escapes the html-significant characters of a parameter value.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[must_use]
pub fn looks_like_html(source: &str) -> bool {
    match source.find('<') {
        Some(open) => source[open..].contains('>'),
        None => false,
    }
}

/// Formats a message source for `locale`.
///
/// # Errors
///
/// Returns the parser diagnostics when `source` is not a valid Fluent pattern.
pub fn format_message(
    locale: &str,
    source: &str,
    params: &Params,
    escape_parameters: bool,
) -> Result<String, String> {
    if source.trim().is_empty() {
        return Ok(String::new());
    }

    // Continuation lines of a Fluent pattern must be indented.
    let body = source.lines().collect::<Vec<_>>().join("\n    ");
    let resource = FluentResource::try_new(format!("{MESSAGE_ID} = {body}\n"))
        .map_err(|(_, errors)| format!("{errors:?}"))?;

    let mut bundle = FluentBundle::new(vec![language_identifier(locale)]);
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| format!("{errors:?}"))?;

    let pattern = bundle
        .get_message(MESSAGE_ID)
        .and_then(|message| message.value())
        .ok_or_else(|| "message has no value".to_string())?;

    let mut args = FluentArgs::new();
    for (name, value) in params.iter() {
        let value = match value {
            ParamValue::Text(text) if escape_parameters => FluentValue::from(escape_html(text)),
            ParamValue::Text(text) => FluentValue::from(text.clone()),
            ParamValue::Number(number) => FluentValue::from(*number),
        };
        args.set(name.to_string(), value);
    }

    let mut errors = vec![];
    let value = bundle
        .format_pattern(pattern, Some(&args), &mut errors)
        .to_string();
    if !errors.is_empty() {
        tracing::debug!(?errors, "message formatted with unresolved references");
    }
    Ok(value)
}
