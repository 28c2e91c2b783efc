// SPDX-License-Identifier: MPL-2.0
//! Options a localization instance is built from, and the per-component
//! fragment declaring them.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

use super::composer::ComposerRef;
use super::formats::{LocaleDateTimeFormats, LocaleNumberFormats};
use super::instance::Localization;
use super::messages::{InlineBlock, LocaleMessages, MessageTree};

/// Handler consulted for keys no locale resolves: `(locale, key) -> message`.
#[derive(Clone)]
pub struct MissingHandler(Rc<dyn Fn(&str, &str) -> Option<String>>);

impl MissingHandler {
    pub fn new(handler: impl Fn(&str, &str) -> Option<String> + 'static) -> Self {
        Self(Rc::new(handler))
    }

    #[must_use]
    pub fn call(&self, locale: &str, key: &str) -> Option<String> {
        (self.0)(locale, key)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MissingHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MissingHandler(..)")
    }
}

/// Hook applied to every translated string: `(translated, key) -> output`.
#[derive(Clone)]
pub struct PostTranslation(Rc<dyn Fn(String, &str) -> String>);

impl PostTranslation {
    pub fn new(hook: impl Fn(String, &str) -> String + 'static) -> Self {
        Self(Rc::new(hook))
    }

    #[must_use]
    pub fn apply(&self, translated: String, key: &str) -> String {
        (self.0)(translated, key)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PostTranslation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostTranslation(..)")
    }
}

/// Listener the root notifies when a component binds an instance:
/// `(bound instance, root instance)`.
#[derive(Clone)]
pub struct InstanceCreatedListener(Rc<dyn Fn(&Localization, &Localization)>);

impl InstanceCreatedListener {
    pub fn new(listener: impl Fn(&Localization, &Localization) + 'static) -> Self {
        Self(Rc::new(listener))
    }

    pub fn notify(&self, target: &Localization, root: &Localization) {
        (self.0)(target, root)
    }
}

impl fmt::Debug for InstanceCreatedListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InstanceCreatedListener(..)")
    }
}

/// How messages containing html are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarnHtmlLevel {
    #[default]
    Off,
    Warn,
    Error,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
        OneOrMany::One(locale) => vec![locale],
        OneOrMany::Many(locales) => locales,
    }))
}

/// Configuration of a localization instance.
///
/// Every field is optional; absent fields take the instance defaults (or,
/// when merged into the root, keep the root's current value).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocalizationOptions {
    pub locale: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub fallback_locale: Option<Vec<String>>,
    pub messages: Option<LocaleMessages>,
    pub datetime_formats: Option<LocaleDateTimeFormats>,
    pub number_formats: Option<LocaleNumberFormats>,
    #[serde(skip)]
    pub missing: Option<MissingHandler>,
    pub silent_translation_warn: Option<bool>,
    pub silent_fallback_warn: Option<bool>,
    pub format_fallback_messages: Option<bool>,
    #[serde(skip)]
    pub post_translation: Option<PostTranslation>,
    pub warn_html_in_message: Option<WarnHtmlLevel>,
    pub escape_parameter_html: Option<bool>,
    /// Follow the root locale (local instances only).
    pub sync: Option<bool>,
    /// Resolve missing keys through the root (local instances only).
    pub fallback_root: Option<bool>,
    /// Message blocks declared inline with the component.
    #[serde(rename = "blocks")]
    pub inline_blocks: Vec<InlineBlock>,
    /// Formatting engine of the root instance.
    #[serde(skip)]
    pub root: Option<ComposerRef>,
    #[serde(skip)]
    pub component_instance_created: Option<InstanceCreatedListener>,
}

impl LocalizationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options holding nothing but inline message blocks.
    #[must_use]
    pub fn from_blocks(blocks: Vec<InlineBlock>) -> Self {
        Self {
            inline_blocks: blocks,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(vec![locale.into()]);
        self
    }

    /// Adds (or replaces) the messages of one locale.
    #[must_use]
    pub fn with_messages(mut self, locale: impl Into<String>, messages: MessageTree) -> Self {
        self.messages
            .get_or_insert_with(LocaleMessages::new)
            .insert(locale.into(), messages);
        self
    }

    #[must_use]
    pub fn with_missing(mut self, handler: MissingHandler) -> Self {
        self.missing = Some(handler);
        self
    }

    #[must_use]
    pub fn with_post_translation(mut self, hook: PostTranslation) -> Self {
        self.post_translation = Some(hook);
        self
    }

    #[must_use]
    pub fn with_instance_created_listener(mut self, listener: InstanceCreatedListener) -> Self {
        self.component_instance_created = Some(listener);
        self
    }
}

/// Localization declared by a component, normalized from its two legacy shapes.
#[derive(Debug, Clone)]
pub enum I18nFragment {
    /// A structured options object, inline blocks already folded in.
    Structured(Box<LocalizationOptions>),
    /// Inline message blocks without any other configuration.
    Inline(Vec<InlineBlock>),
}

impl I18nFragment {
    /// Normalizes a component declaration; `None` when it declares nothing.
    #[must_use]
    pub fn from_declaration(
        options: Option<&LocalizationOptions>,
        blocks: &[InlineBlock],
    ) -> Option<Self> {
        match options {
            Some(options) => {
                let mut options = options.clone();
                if !blocks.is_empty() {
                    options.inline_blocks = blocks.to_vec();
                }
                Some(Self::Structured(Box::new(options)))
            }
            None if !blocks.is_empty() => Some(Self::Inline(blocks.to_vec())),
            None => None,
        }
    }

    /// The canonical merge input.
    #[must_use]
    pub fn into_options(self) -> LocalizationOptions {
        match self {
            Self::Structured(options) => *options,
            Self::Inline(blocks) => LocalizationOptions::from_blocks(blocks),
        }
    }
}
