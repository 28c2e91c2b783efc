// SPDX-License-Identifier: MPL-2.0
//! Named datetime and number formats, catalogued per locale.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on rendered fraction digits.
const MAX_FRACTION_DIGITS: usize = 20;

/// Named datetime formats of one locale.
pub type DateTimeFormats = BTreeMap<String, DateTimeFormat>;

/// Named number formats of one locale.
pub type NumberFormats = BTreeMap<String, NumberFormat>;

/// Datetime formats of every locale.
pub type LocaleDateTimeFormats = BTreeMap<String, DateTimeFormats>;

/// Number formats of every locale.
pub type LocaleNumberFormats = BTreeMap<String, NumberFormats>;

/// Rendering used when no named datetime format resolves.
pub const DEFAULT_DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// A datetime format: a `strftime` pattern rendered at an optional UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeFormat {
    pub pattern: String,
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl DateTimeFormat {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            utc_offset_minutes: None,
        }
    }

    #[must_use]
    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = Some(minutes);
        self
    }

    /// Renders `value`. An invalid pattern falls back to [`DEFAULT_DATETIME_PATTERN`].
    #[must_use]
    pub fn format(&self, value: &DateTime<Utc>) -> String {
        let offset = self
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .unwrap_or_else(|| Utc.fix());
        let local = value.with_timezone(&offset);
        let mut rendered = String::new();
        if write!(rendered, "{}", local.format(&self.pattern)).is_err() {
            tracing::warn!(pattern = %self.pattern, "invalid datetime pattern");
            return local.format(DEFAULT_DATETIME_PATTERN).to_string();
        }
        rendered
    }
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DATETIME_PATTERN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    #[default]
    Decimal,
    Percent,
    Currency,
}

/// A number format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberFormat {
    #[serde(default)]
    pub style: NumberStyle,
    /// ISO 4217 code, used by [`NumberStyle::Currency`].
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub minimum_fraction_digits: Option<usize>,
    /// Capped at 20 when rendering.
    #[serde(default)]
    pub maximum_fraction_digits: Option<usize>,
    #[serde(default)]
    pub use_grouping: Option<bool>,
}

impl NumberFormat {
    #[must_use]
    pub fn decimal() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn percent() -> Self {
        Self {
            style: NumberStyle::Percent,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            style: NumberStyle::Currency,
            currency: Some(code.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let (default_min, default_max) = match self.style {
            NumberStyle::Decimal => (0, 3),
            NumberStyle::Percent => (0, 0),
            NumberStyle::Currency => (2, 2),
        };
        let max = self
            .maximum_fraction_digits
            .unwrap_or(default_max)
            .min(MAX_FRACTION_DIGITS);
        let min = self.minimum_fraction_digits.unwrap_or(default_min).min(max);
        let scaled = match self.style {
            NumberStyle::Percent => value * 100.0,
            _ => value,
        };

        let rendered = format!("{:.*}", max, scaled.abs());
        let (integer, fraction) = match rendered.split_once('.') {
            Some((integer, fraction)) => (integer.to_string(), fraction.to_string()),
            None => (rendered, String::new()),
        };
        let mut fraction = fraction;
        while fraction.len() > min && fraction.ends_with('0') {
            fraction.pop();
        }
        let integer = if self.use_grouping.unwrap_or(true) {
            group_thousands(&integer)
        } else {
            integer
        };

        let is_zero = integer.chars().all(|c| c == '0' || c == ',')
            && fraction.chars().all(|c| c == '0');
        let mut number = String::new();
        if scaled < 0.0 && !is_zero {
            number.push('-');
        }
        number.push_str(&integer);
        if !fraction.is_empty() {
            number.push('.');
            number.push_str(&fraction);
        }

        match self.style {
            NumberStyle::Decimal => number,
            NumberStyle::Percent => format!("{number}%"),
            NumberStyle::Currency => {
                let code = self.currency.as_deref().unwrap_or("USD");
                match currency_symbol(code) {
                    Some(symbol) => format!("{symbol}{number}"),
                    None => format!("{code} {number}"),
                }
            }
        }
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Merges named formats into a locale's existing formats, key by key.
pub fn merge_formats<T: Clone>(
    target: &mut BTreeMap<String, BTreeMap<String, T>>,
    locale: &str,
    formats: &BTreeMap<String, T>,
) {
    let existing = target.entry(locale.to_string()).or_default();
    for (name, format) in formats {
        existing.insert(name.clone(), format.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetime_format_applies_pattern_and_offset() {
        let value = Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        let short = DateTimeFormat::new("%d/%m/%Y");
        assert_eq!(short.format(&value), "09/03/2024");

        let paris = DateTimeFormat::new("%d/%m/%Y %H:%M").with_utc_offset(60);
        assert_eq!(paris.format(&value), "10/03/2024 00:30");
    }

    #[test]
    fn invalid_pattern_falls_back_to_default() {
        let value = Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 0).unwrap();
        assert_eq!(
            DateTimeFormat::new("%Q").format(&value),
            "2024-03-09 08:05:00"
        );
    }

    #[test]
    fn decimal_trims_trailing_zeros_and_groups() {
        assert_eq!(NumberFormat::decimal().format(1234567.5), "1,234,567.5");
        assert_eq!(NumberFormat::decimal().format(12.0), "12");
        assert_eq!(NumberFormat::decimal().format(-0.25), "-0.25");
    }

    #[test]
    fn grouping_can_be_disabled() {
        let format = NumberFormat {
            use_grouping: Some(false),
            ..NumberFormat::decimal()
        };
        assert_eq!(format.format(1234567.0), "1234567");
    }

    #[test]
    fn percent_scales_value() {
        assert_eq!(NumberFormat::percent().format(0.256), "26%");
    }

    #[test]
    fn currency_keeps_two_fraction_digits() {
        assert_eq!(NumberFormat::currency("USD").format(1500.0), "$1,500.00");
        assert_eq!(NumberFormat::currency("CHF").format(3.456), "CHF 3.46");
    }

    #[test]
    fn minimum_fraction_digits_pad() {
        let format = NumberFormat {
            minimum_fraction_digits: Some(2),
            ..NumberFormat::decimal()
        };
        assert_eq!(format.format(7.0), "7.00");
    }

    #[test]
    fn huge_fraction_digits_are_capped() {
        let format = NumberFormat {
            minimum_fraction_digits: Some(usize::MAX),
            maximum_fraction_digits: Some(usize::MAX),
            ..NumberFormat::decimal()
        };
        let rendered = format.format(1.5);
        let (_, fraction) = rendered.split_once('.').unwrap();
        assert_eq!(fraction.len(), MAX_FRACTION_DIGITS);
        assert!(fraction.starts_with('5'));
    }

    #[test]
    fn merge_formats_keeps_existing_names() {
        let mut catalog: LocaleNumberFormats = BTreeMap::new();
        merge_formats(
            &mut catalog,
            "en",
            &NumberFormats::from([("currency".to_string(), NumberFormat::currency("USD"))]),
        );
        merge_formats(
            &mut catalog,
            "en",
            &NumberFormats::from([("percent".to_string(), NumberFormat::percent())]),
        );
        assert_eq!(catalog["en"].len(), 2);
    }
}
