// SPDX-License-Identifier: MPL-2.0
//! Localization instances with the legacy component API.
//!
//! A [`Localization`] is a cheap, clonable handle. Clones alias the same
//! instance: binding the root instance to a component never copies it.

use std::cell::{Ref, RefMut};
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::composer::{Composer, ComposerRef, InstanceSettings};
use super::formats::{DateTimeFormats, NumberFormats};
use super::messages::{MessageTree, MessageValue};
use super::options::{InstanceCreatedListener, LocalizationOptions};
use super::params::Params;
use crate::diagnostics::Emitter;
use crate::domain::component::InstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The process-wide root instance.
    Global,
    /// An instance owned by a single component.
    Local,
}

struct Inner {
    scope: Scope,
    composer: ComposerRef,
    created_listener: Option<InstanceCreatedListener>,
}

/// Handle to a root or local localization instance.
#[derive(Clone)]
pub struct Localization {
    inner: Rc<Inner>,
}

impl fmt::Debug for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localization")
            .field("scope", &self.inner.scope)
            .field("composer", &self.inner.composer)
            .finish()
    }
}

impl Localization {
    fn with_scope(scope: Scope, mut options: LocalizationOptions) -> Self {
        let created_listener = options.component_instance_created.take();
        Self {
            inner: Rc::new(Inner {
                scope,
                composer: Composer::new(options).into_ref(),
                created_listener,
            }),
        }
    }

    /// Creates the root instance. Any `root` back-reference in `options` is ignored.
    #[must_use]
    pub fn new_global(mut options: LocalizationOptions) -> Self {
        options.root = None;
        Self::with_scope(Scope::Global, options)
    }

    /// Creates an instance owned by one component.
    #[must_use]
    pub fn new_local(options: LocalizationOptions) -> Self {
        Self::with_scope(Scope::Local, options)
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.composer().id()
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.inner.scope
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        self.inner.scope == Scope::Global
    }

    /// Whether both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Localization) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Shared handle to the formatting engine.
    #[must_use]
    pub fn composer_ref(&self) -> ComposerRef {
        Rc::clone(&self.inner.composer)
    }

    /// Borrows the formatting engine.
    ///
    /// # Panics
    ///
    /// Panics if the engine is mutably borrowed, which only happens while
    /// an update on this instance is running.
    #[must_use]
    pub fn composer(&self) -> Ref<'_, Composer> {
        self.inner.composer.borrow()
    }

    fn composer_mut(&self) -> RefMut<'_, Composer> {
        self.inner.composer.borrow_mut()
    }

    // ---------------------------------------------------------------------
    // Legacy API
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn t(&self, key: &str, params: &Params) -> String {
        self.composer().translate(key, params)
    }

    #[must_use]
    pub fn tc(&self, key: &str, choice: i64, params: &Params) -> String {
        self.composer().translate_plural(key, choice, params)
    }

    #[must_use]
    pub fn te(&self, key: &str, locale: Option<&str>) -> bool {
        self.composer().exists(key, locale)
    }

    #[must_use]
    pub fn d(&self, value: &DateTime<Utc>, key: &str) -> String {
        self.composer().format_datetime(value, key)
    }

    #[must_use]
    pub fn n(&self, value: f64, key: &str) -> String {
        self.composer().format_number(value, key)
    }

    #[must_use]
    pub fn tm(&self, key: &str) -> MessageValue {
        self.composer().raw_message(key)
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn locale(&self) -> String {
        self.composer().locale()
    }

    pub fn set_locale(&self, locale: impl Into<String>) {
        self.composer_mut().set_locale(locale);
    }

    #[must_use]
    pub fn fallback_locale(&self) -> Vec<String> {
        self.composer().fallback_locale()
    }

    pub fn set_fallback_locale(&self, locales: Vec<String>) {
        self.update_settings(|settings| settings.fallback_locale = locales);
    }

    #[must_use]
    pub fn settings(&self) -> InstanceSettings {
        self.composer().settings().clone()
    }

    pub fn update_settings(&self, update: impl FnOnce(&mut InstanceSettings)) {
        self.composer_mut().update_settings(update);
    }

    // ---------------------------------------------------------------------
    // Catalogs
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn available_locales(&self) -> Vec<String> {
        self.composer().available_locales()
    }

    #[must_use]
    pub fn locale_message(&self, locale: &str) -> MessageTree {
        self.composer().locale_message(locale)
    }

    pub fn set_locale_message(&self, locale: &str, messages: MessageTree) {
        self.composer_mut().set_locale_message(locale, messages);
    }

    pub fn merge_locale_message(&self, locale: &str, messages: &MessageTree) {
        self.composer_mut().merge_locale_message(locale, messages);
    }

    #[must_use]
    pub fn datetime_format(&self, locale: &str) -> DateTimeFormats {
        self.composer().datetime_format(locale)
    }

    pub fn merge_datetime_format(&self, locale: &str, formats: &DateTimeFormats) {
        self.composer_mut().merge_datetime_format(locale, formats);
    }

    #[must_use]
    pub fn number_format(&self, locale: &str) -> NumberFormats {
        self.composer().number_format(locale)
    }

    pub fn merge_number_format(&self, locale: &str, formats: &NumberFormats) {
        self.composer_mut().merge_number_format(locale, formats);
    }

    // ---------------------------------------------------------------------
    // Diagnostics
    // ---------------------------------------------------------------------

    pub fn enable_emitter(&self, emitter: Emitter) {
        self.composer_mut().enable_emitter(emitter);
    }

    pub fn disable_emitter(&self) {
        self.composer_mut().disable_emitter();
    }

    /// Removes `emitter` from the enabled emitters. The emitter enabled
    /// before it becomes active again.
    ///
    /// Returns whether `emitter` was enabled.
    pub fn disable_emitter_if(&self, emitter: &Emitter) -> bool {
        self.composer_mut().remove_emitter(emitter)
    }

    #[must_use]
    pub fn has_emitter(&self) -> bool {
        self.composer().emitter().is_some()
    }

    /// Notifies this (root) instance that a component bound `target`.
    pub fn on_component_instance_created(&self, target: &Localization) {
        if let Some(listener) = &self.inner.created_listener {
            listener.notify(target, self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn messages(key: &str, text: &str) -> MessageTree {
        MessageTree::from([(key.to_string(), MessageValue::from(text))])
    }

    #[test]
    fn clones_alias_the_same_instance() {
        let root = Localization::new_global(LocalizationOptions::new());
        let alias = root.clone();
        alias.set_locale("fr");
        assert!(root.ptr_eq(&alias));
        assert_eq!(root.locale(), "fr");
        assert!(root.is_global());
    }

    #[test]
    fn local_instances_are_distinct() {
        let root = Localization::new_global(LocalizationOptions::new());
        let local = Localization::new_local(LocalizationOptions {
            root: Some(root.composer_ref()),
            ..LocalizationOptions::default()
        });
        assert!(!local.ptr_eq(&root));
        assert_eq!(local.scope(), Scope::Local);
        assert_ne!(local.id(), root.id());
    }

    #[test]
    fn global_ignores_root_back_reference() {
        let other = Localization::new_global(
            LocalizationOptions::new().with_messages("en-US", messages("k", "other")),
        );
        let root = Localization::new_global(LocalizationOptions {
            root: Some(other.composer_ref()),
            ..LocalizationOptions::default()
        });
        assert_eq!(root.t("k", &Params::new()), "k");
    }

    #[test]
    fn legacy_api_forwards_to_composer() {
        let i18n = Localization::new_global(
            LocalizationOptions::new()
                .with_locale("en")
                .with_messages("en", messages("greet", "Hi { $name }")),
        );
        assert_eq!(i18n.t("greet", &Params::new().with("name", "Ada")), "Hi Ada");
        assert!(i18n.te("greet", None));
        assert!(!i18n.te("greet", Some("fr")));
        assert_eq!(i18n.tm("greet"), MessageValue::from("Hi { $name }"));
        assert_eq!(i18n.n(1000.0, "absent"), "1,000");
    }

    #[test]
    fn disable_emitter_if_requires_matching_emitter() {
        let i18n = Localization::new_global(LocalizationOptions::new());
        let attached = Emitter::new();
        i18n.enable_emitter(attached.clone());

        assert!(!i18n.disable_emitter_if(&Emitter::new()));
        assert!(i18n.has_emitter());
        assert!(i18n.disable_emitter_if(&attached));
        assert!(!i18n.has_emitter());
    }

    #[test]
    fn disable_emitter_if_restores_earlier_emitter() {
        let i18n = Localization::new_global(LocalizationOptions::new());
        let first = Emitter::new();
        let second = Emitter::new();
        i18n.enable_emitter(first.clone());
        i18n.enable_emitter(second.clone());

        assert!(i18n.disable_emitter_if(&second));
        assert!(i18n.composer().emitter().is_some_and(|active| active.ptr_eq(&first)));
    }

    #[test]
    fn created_listener_receives_target_and_root() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let root = Localization::new_global(LocalizationOptions::new().with_instance_created_listener(
            InstanceCreatedListener::new(move |target, root| {
                assert!(!target.ptr_eq(root));
                seen.set(seen.get() + 1);
            }),
        ));
        let local = Localization::new_local(LocalizationOptions::new());

        root.on_component_instance_created(&local);
        local.on_component_instance_created(&root);

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn fallback_locale_is_updatable() {
        let i18n = Localization::new_global(LocalizationOptions::new());
        i18n.set_fallback_locale(vec!["de".into()]);
        assert_eq!(i18n.fallback_locale(), vec!["de".to_string()]);
    }
}
