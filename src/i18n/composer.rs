// SPDX-License-Identifier: MPL-2.0
//! The formatting engine behind a localization instance.
//!
//! A [`Composer`] owns the catalogs and settings of one instance and
//! resolves keys through its locale chain:
//!
//! 1. the current locale, then its bare language (`fr-CA` → `fr`)
//! 2. each fallback locale, then its bare language
//! 3. the root composer, for local instances with `fallback_root`
//! 4. the missing handler
//! 5. the key itself
//!
//! While an [`Emitter`] is enabled every resolution step is published on it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::fluent::{format_message, language_identifier, looks_like_html};
use super::formats::{
    merge_formats, DateTimeFormat, DateTimeFormats, LocaleDateTimeFormats, LocaleNumberFormats,
    NumberFormat, NumberFormats,
};
use super::messages::{
    count_messages, deep_merge, resolve_locale_messages, resolve_path, LocaleMessages,
    MessageTree, MessageValue,
};
use super::options::{LocalizationOptions, MissingHandler, PostTranslation, WarnHtmlLevel};
use super::params::Params;
use crate::config::{DEFAULT_FALLBACK_LOCALE, DEFAULT_FALLBACK_ROOT, DEFAULT_LOCALE, DEFAULT_SYNC};
use crate::diagnostics::{Emitter, I18nEvent, I18nEventKind};
use crate::domain::component::InstanceId;

/// Shared handle to a composer.
pub type ComposerRef = Rc<RefCell<Composer>>;

/// Behavioral settings of an instance, the fields the root merger folds into.
#[derive(Debug, Clone)]
pub struct InstanceSettings {
    pub locale: String,
    pub fallback_locale: Vec<String>,
    pub missing: Option<MissingHandler>,
    pub silent_translation_warn: bool,
    pub silent_fallback_warn: bool,
    pub format_fallback_messages: bool,
    pub post_translation: Option<PostTranslation>,
    pub warn_html_in_message: WarnHtmlLevel,
    pub escape_parameter_html: bool,
    pub sync: bool,
    pub fallback_root: bool,
}

impl Default for InstanceSettings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: vec![DEFAULT_FALLBACK_LOCALE.to_string()],
            missing: None,
            silent_translation_warn: false,
            silent_fallback_warn: false,
            format_fallback_messages: false,
            post_translation: None,
            warn_html_in_message: WarnHtmlLevel::Off,
            escape_parameter_html: false,
            sync: DEFAULT_SYNC,
            fallback_root: DEFAULT_FALLBACK_ROOT,
        }
    }
}

impl InstanceSettings {
    #[must_use]
    pub fn from_options(options: &LocalizationOptions) -> Self {
        let defaults = Self::default();
        Self {
            locale: options.locale.clone().unwrap_or(defaults.locale),
            fallback_locale: options
                .fallback_locale
                .clone()
                .unwrap_or(defaults.fallback_locale),
            missing: options.missing.clone(),
            silent_translation_warn: options
                .silent_translation_warn
                .unwrap_or(defaults.silent_translation_warn),
            silent_fallback_warn: options
                .silent_fallback_warn
                .unwrap_or(defaults.silent_fallback_warn),
            format_fallback_messages: options
                .format_fallback_messages
                .unwrap_or(defaults.format_fallback_messages),
            post_translation: options.post_translation.clone(),
            warn_html_in_message: options
                .warn_html_in_message
                .unwrap_or(defaults.warn_html_in_message),
            escape_parameter_html: options
                .escape_parameter_html
                .unwrap_or(defaults.escape_parameter_html),
            sync: options.sync.unwrap_or(defaults.sync),
            fallback_root: options.fallback_root.unwrap_or(defaults.fallback_root),
        }
    }
}

/// Formatting engine of one localization instance.
pub struct Composer {
    id: InstanceId,
    settings: InstanceSettings,
    messages: LocaleMessages,
    datetime_formats: LocaleDateTimeFormats,
    number_formats: LocaleNumberFormats,
    root: Option<ComposerRef>,
    /// Enabled emitters, the last one active.
    emitters: Vec<Emitter>,
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("id", &self.id)
            .field("locale", &self.settings.locale)
            .field("locales", &self.messages.keys().collect::<Vec<_>>())
            .field("has_root", &self.root.is_some())
            .field("emitters", &self.emitters.len())
            .finish_non_exhaustive()
    }
}

impl Composer {
    #[must_use]
    pub fn new(options: LocalizationOptions) -> Self {
        let settings = InstanceSettings::from_options(&options);
        let messages = resolve_locale_messages(
            &settings.locale,
            options.messages.as_ref(),
            &options.inline_blocks,
        );
        Self {
            id: InstanceId::next(),
            settings,
            messages,
            datetime_formats: options.datetime_formats.unwrap_or_default(),
            number_formats: options.number_formats.unwrap_or_default(),
            root: options.root,
            emitters: Vec::new(),
        }
    }

    #[must_use]
    pub fn into_ref(self) -> ComposerRef {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> &InstanceSettings {
        &self.settings
    }

    /// Applies `update` to the settings, reporting a locale change.
    pub fn update_settings(&mut self, update: impl FnOnce(&mut InstanceSettings)) {
        let previous = self.settings.locale.clone();
        update(&mut self.settings);
        if self.settings.locale != previous {
            let to = self.settings.locale.clone();
            self.emit(I18nEventKind::LocaleChanged { from: previous, to });
        }
    }

    fn synced_root(&self) -> Option<&ComposerRef> {
        self.root.as_ref().filter(|_| self.settings.sync)
    }

    /// Effective locale: the root's while synced, otherwise the own setting.
    #[must_use]
    pub fn locale(&self) -> String {
        match self.synced_root() {
            Some(root) => root.borrow().locale(),
            None => self.settings.locale.clone(),
        }
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.update_settings(|settings| settings.locale = locale);
    }

    #[must_use]
    pub fn fallback_locale(&self) -> Vec<String> {
        match self.synced_root() {
            Some(root) => root.borrow().fallback_locale(),
            None => self.settings.fallback_locale.clone(),
        }
    }

    /// Locales consulted, in order, when resolving for `locale`.
    #[must_use]
    pub fn locale_chain(&self, locale: &str) -> Vec<String> {
        let mut chain: Vec<String> = Vec::new();
        let mut push = |candidate: &str| {
            if !candidate.is_empty() && !chain.iter().any(|existing| existing == candidate) {
                chain.push(candidate.to_string());
            }
        };
        let fallbacks = self.fallback_locale();
        for candidate in std::iter::once(locale).chain(fallbacks.iter().map(String::as_str)) {
            push(candidate);
            let language = language_identifier(candidate);
            if language.region.is_some() || language.script.is_some() {
                push(language.language.as_str());
            }
        }
        chain
    }

    // ---------------------------------------------------------------------
    // Catalogs
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn available_locales(&self) -> Vec<String> {
        self.messages.keys().cloned().collect()
    }

    #[must_use]
    pub fn locale_message(&self, locale: &str) -> MessageTree {
        self.messages.get(locale).cloned().unwrap_or_default()
    }

    pub fn set_locale_message(&mut self, locale: &str, messages: MessageTree) {
        self.messages.insert(locale.to_string(), messages);
    }

    /// Merges `messages` into the catalog of `locale`, entry by entry.
    pub fn merge_locale_message(&mut self, locale: &str, messages: &MessageTree) {
        let target = self.messages.entry(locale.to_string()).or_default();
        deep_merge(target, messages);
        self.emit(I18nEventKind::MessagesMerged {
            locale: locale.to_string(),
            count: count_messages(messages),
        });
    }

    #[must_use]
    pub fn datetime_format(&self, locale: &str) -> DateTimeFormats {
        self.datetime_formats.get(locale).cloned().unwrap_or_default()
    }

    pub fn merge_datetime_format(&mut self, locale: &str, formats: &DateTimeFormats) {
        merge_formats(&mut self.datetime_formats, locale, formats);
    }

    #[must_use]
    pub fn number_format(&self, locale: &str) -> NumberFormats {
        self.number_formats.get(locale).cloned().unwrap_or_default()
    }

    pub fn merge_number_format(&mut self, locale: &str, formats: &NumberFormats) {
        merge_formats(&mut self.number_formats, locale, formats);
    }

    // ---------------------------------------------------------------------
    // Diagnostics
    // ---------------------------------------------------------------------

    /// Makes `emitter` the active emitter. The previously active one resumes
    /// once `emitter` is removed.
    pub fn enable_emitter(&mut self, emitter: Emitter) {
        self.emitters.retain(|enabled| !enabled.ptr_eq(&emitter));
        self.emitters.push(emitter);
    }

    /// Removes `emitter`, wherever it sits in the stack of enabled emitters.
    ///
    /// Returns whether it was enabled.
    pub fn remove_emitter(&mut self, emitter: &Emitter) -> bool {
        let before = self.emitters.len();
        self.emitters.retain(|enabled| !enabled.ptr_eq(emitter));
        self.emitters.len() != before
    }

    /// Disables every enabled emitter.
    pub fn disable_emitter(&mut self) {
        self.emitters.clear();
    }

    /// The active emitter.
    #[must_use]
    pub fn emitter(&self) -> Option<&Emitter> {
        self.emitters.last()
    }

    fn emit(&self, kind: I18nEventKind) {
        if let Some(emitter) = self.emitter() {
            emitter.emit(&I18nEvent::new(self.id, kind));
        }
    }

    // ---------------------------------------------------------------------
    // Resolution
    // ---------------------------------------------------------------------

    fn lookup<'a, T>(
        &self,
        key: &str,
        mut find: impl FnMut(&str) -> Option<&'a T>,
    ) -> Option<(String, &'a T)> {
        let current = self.locale();
        for locale in self.locale_chain(&current) {
            if let Some(found) = find(&locale) {
                if locale != current {
                    if !self.settings.silent_fallback_warn {
                        tracing::warn!(key, from = %current, to = %locale, "falling back to another locale");
                    }
                    self.emit(I18nEventKind::TranslateFallback {
                        key: key.to_string(),
                        from: current.clone(),
                        to: locale.clone(),
                    });
                }
                return Some((locale, found));
            }
        }
        None
    }

    fn lookup_text(&self, key: &str) -> Option<(String, String)> {
        let messages = &self.messages;
        self.lookup(key, |locale| {
            messages
                .get(locale)
                .and_then(|tree| resolve_path(tree, key))
                .filter(|value| value.as_text().is_some())
        })
        .and_then(|(locale, value)| value.as_text().map(|text| (locale, text.to_string())))
    }

    fn root_fallback(&self) -> Option<&ComposerRef> {
        self.root.as_ref().filter(|_| self.settings.fallback_root)
    }

    fn render(&self, key: &str, locale: &str, source: &str, params: &Params) -> String {
        if looks_like_html(source) {
            match self.settings.warn_html_in_message {
                WarnHtmlLevel::Off => {}
                WarnHtmlLevel::Warn => tracing::warn!(key, "message contains html"),
                WarnHtmlLevel::Error => tracing::error!(key, "message contains html"),
            }
        }
        match format_message(locale, source, params, self.settings.escape_parameter_html) {
            Ok(text) => text,
            Err(message) => {
                tracing::warn!(key, locale, "failed to compile message: {message}");
                self.emit(I18nEventKind::CompileError {
                    key: key.to_string(),
                    locale: locale.to_string(),
                    message,
                });
                source.to_string()
            }
        }
    }

    fn resolve(&self, key: &str, params: &Params, choice: Option<i64>) -> String {
        let translated = match self.lookup_text(key) {
            Some((locale, source)) => {
                self.emit(I18nEventKind::Translate {
                    key: key.to_string(),
                    locale: locale.clone(),
                });
                match choice {
                    Some(choice) => {
                        let source = select_plural_form(&source, choice);
                        self.render(key, &locale, source, &with_choice(params, choice))
                    }
                    None => self.render(key, &locale, &source, params),
                }
            }
            None => return self.resolve_missing(key, params, choice),
        };
        self.post_translate(translated, key)
    }

    fn resolve_missing(&self, key: &str, params: &Params, choice: Option<i64>) -> String {
        let locale = self.locale();
        if let Some(handler) = &self.settings.missing {
            if let Some(text) = handler.call(&locale, key) {
                return self.post_translate(text, key);
            }
        }
        if let Some(root) = self.root_fallback() {
            tracing::debug!(key, "resolving with the root instance");
            return root.borrow().resolve(key, params, choice);
        }

        if !self.settings.silent_translation_warn {
            tracing::warn!(key, %locale, "cannot translate the key");
        }
        self.emit(I18nEventKind::TranslateMissing {
            key: key.to_string(),
            locale: locale.clone(),
        });
        let text = if self.settings.format_fallback_messages {
            self.render(key, &locale, key, params)
        } else {
            key.to_string()
        };
        self.post_translate(text, key)
    }

    fn post_translate(&self, translated: String, key: &str) -> String {
        match &self.settings.post_translation {
            Some(hook) => hook.apply(translated, key),
            None => translated,
        }
    }

    /// Translates `key`.
    #[must_use]
    pub fn translate(&self, key: &str, params: &Params) -> String {
        self.resolve(key, params, None)
    }

    /// Translates `key` selecting a `a | b | c` form for `choice`.
    ///
    /// `count` and `n` are set to `choice` unless `params` already defines them.
    #[must_use]
    pub fn translate_plural(&self, key: &str, choice: i64, params: &Params) -> String {
        self.resolve(key, params, Some(choice))
    }

    /// Whether `key` resolves to a message in `locale` (default: current), without fallback.
    #[must_use]
    pub fn exists(&self, key: &str, locale: Option<&str>) -> bool {
        let locale = locale.map_or_else(|| self.locale(), str::to_string);
        self.messages
            .get(&locale)
            .and_then(|tree| resolve_path(tree, key))
            .is_some_and(|value| value.as_text().is_some())
    }

    /// Raw message subtree at `key`, or an empty tree.
    #[must_use]
    pub fn raw_message(&self, key: &str) -> MessageValue {
        let messages = &self.messages;
        if let Some((_, value)) =
            self.lookup(key, |locale| messages.get(locale).and_then(|tree| resolve_path(tree, key)))
        {
            return value.clone();
        }
        match self.root_fallback() {
            Some(root) => root.borrow().raw_message(key),
            None => MessageValue::empty(),
        }
    }

    /// Formats `value` with the named datetime format `key`.
    #[must_use]
    pub fn format_datetime(&self, value: &DateTime<Utc>, key: &str) -> String {
        let formats = &self.datetime_formats;
        if let Some((_, format)) = self.lookup(key, |locale| formats.get(locale)?.get(key)) {
            return format.format(value);
        }
        if let Some(root) = self.root_fallback() {
            return root.borrow().format_datetime(value, key);
        }
        self.report_missing_format(key);
        DateTimeFormat::default().format(value)
    }

    /// Formats `value` with the named number format `key`.
    #[must_use]
    pub fn format_number(&self, value: f64, key: &str) -> String {
        let formats = &self.number_formats;
        if let Some((_, format)) = self.lookup(key, |locale| formats.get(locale)?.get(key)) {
            return format.format(value);
        }
        if let Some(root) = self.root_fallback() {
            return root.borrow().format_number(value, key);
        }
        self.report_missing_format(key);
        NumberFormat::decimal().format(value)
    }

    fn report_missing_format(&self, key: &str) {
        let locale = self.locale();
        if !self.settings.silent_translation_warn {
            tracing::warn!(key, %locale, "no format found");
        }
        self.emit(I18nEventKind::TranslateMissing {
            key: key.to_string(),
            locale,
        });
    }
}

/// Index of the legacy plural form for `choice` among `forms` forms.
///
/// Two forms read `singular | plural`; three or more read `zero | one | many`.
#[must_use]
pub fn plural_index(choice: i64, forms: usize) -> usize {
    let choice = usize::try_from(choice.unsigned_abs()).unwrap_or(usize::MAX);
    let index = if forms == 2 {
        if choice == 1 {
            0
        } else {
            1
        }
    } else {
        choice.min(2)
    };
    index.min(forms.saturating_sub(1))
}

fn select_plural_form(source: &str, choice: i64) -> &str {
    let forms: Vec<&str> = source.split('|').map(str::trim).collect();
    forms[plural_index(choice, forms.len())]
}

fn with_choice(params: &Params, choice: i64) -> Params {
    let mut params = params.clone();
    for name in ["count", "n"] {
        if !params.contains(name) {
            params.insert(name, choice);
        }
    }
    params
}
