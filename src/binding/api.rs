// SPDX-License-Identifier: MPL-2.0
//! Translation API exposed on a bound component.

use chrono::{DateTime, Utc};

use crate::i18n::{Localization, MessageValue, Params};

/// Forwarding surface installed on a component while it holds a binding.
///
/// Every call goes straight to the bound instance.
#[derive(Debug, Clone)]
pub struct I18nApi {
    i18n: Localization,
}

impl I18nApi {
    pub(crate) fn new(i18n: Localization) -> Self {
        Self { i18n }
    }

    /// Translates `key`.
    #[must_use]
    pub fn t(&self, key: &str, params: &Params) -> String {
        self.i18n.t(key, params)
    }

    /// Translates `key` with legacy `a | b | c` pluralization.
    #[must_use]
    pub fn tc(&self, key: &str, choice: i64, params: &Params) -> String {
        self.i18n.tc(key, choice, params)
    }

    /// Whether `key` exists in `locale` (the current locale when `None`).
    #[must_use]
    pub fn te(&self, key: &str, locale: Option<&str>) -> bool {
        self.i18n.te(key, locale)
    }

    #[must_use]
    pub fn d(&self, value: &DateTime<Utc>, key: &str) -> String {
        self.i18n.d(value, key)
    }

    #[must_use]
    pub fn n(&self, value: f64, key: &str) -> String {
        self.i18n.n(value, key)
    }

    /// Raw message subtree at `key`, empty when nothing resolves.
    #[must_use]
    pub fn tm(&self, key: &str) -> MessageValue {
        self.i18n.tm(key)
    }

    /// The instance calls are forwarded to.
    #[must_use]
    pub fn instance(&self) -> &Localization {
        &self.i18n
    }
}
