// SPDX-License-Identifier: MPL-2.0
//! Application-wide localization context.
//!
//! An [`I18n`] owns the root instance for the lifetime of the application,
//! the registry of component bindings, and (when devtools are active) the
//! timeline diagnostics events are recorded in. Components are bound
//! through the [`I18nMixin`] it builds.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use lens_i18n::component::{ComponentOptions, ComponentTree};
//! use lens_i18n::domain::component::RenderMode;
//! use lens_i18n::i18n::{LocalizationOptions, MessageTree, MessageValue, Params};
//! use lens_i18n::plugin::I18n;
//!
//! let messages = MessageTree::from([("hello".to_string(), MessageValue::from("Hello"))]);
//! let i18n = I18n::new(LocalizationOptions::new().with_locale("en").with_messages("en", messages));
//!
//! let mut tree = ComponentTree::new(RenderMode::Interactive);
//! tree.register_hooks(Rc::new(i18n.mixin()));
//! let app = tree.create(None, ComponentOptions::named("app")).unwrap();
//!
//! let api = tree.node(app).and_then(|node| node.i18n_api()).unwrap();
//! assert_eq!(api.t("hello", &Params::new()), "Hello");
//! ```

use crate::binding::{I18nMixin, InstanceRegistry};
use crate::config::{Config, DEFAULT_FALLBACK_LOCALE, DEFAULT_LOCALE};
use crate::diagnostics::Timeline;
use crate::domain::component::{ComponentId, RenderMode};
use crate::domain::diagnostics::TimelineCapacity;
use crate::error::Result;
use crate::i18n::locale::{bundled_messages, resolve_locale};
use crate::i18n::{Localization, LocalizationOptions};

#[derive(Debug)]
pub struct I18n {
    global: Localization,
    registry: InstanceRegistry,
    timeline: Option<Timeline>,
    render_mode: RenderMode,
    local_fallback_root: Option<bool>,
}

impl I18n {
    /// Creates the context with the default devtools policy: active in
    /// debug builds with the `devtools` feature.
    #[must_use]
    pub fn new(options: LocalizationOptions) -> Self {
        let timeline = Config::default()
            .devtools_enabled()
            .then(|| Timeline::new(TimelineCapacity::default()));
        Self::with_timeline(options, timeline)
    }

    /// Creates the context recording diagnostics into `timeline`, if any.
    #[must_use]
    pub fn with_timeline(options: LocalizationOptions, timeline: Option<Timeline>) -> Self {
        Self {
            global: Localization::new_global(options),
            registry: InstanceRegistry::new(),
            timeline,
            render_mode: RenderMode::default(),
            local_fallback_root: None,
        }
    }

    /// Creates the context from the user configuration and the bundled catalogs.
    ///
    /// The root locale is taken from `cli_lang`, then the configuration,
    /// then the OS, falling back to the default locale.
    ///
    /// # Errors
    ///
    /// Returns an error when a bundled catalog does not parse.
    pub fn from_config(config: &Config, cli_lang: Option<&str>) -> Result<Self> {
        let messages = bundled_messages()?;
        let available: Vec<String> = messages.keys().cloned().collect();
        let locale = resolve_locale(cli_lang, config, &available)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let fallback = config
            .fallback_language
            .clone()
            .unwrap_or_else(|| DEFAULT_FALLBACK_LOCALE.to_string());

        tracing::info!(%locale, %fallback, locales = available.len(), "localization ready");

        let options = LocalizationOptions {
            locale: Some(locale),
            fallback_locale: Some(vec![fallback]),
            messages: Some(messages),
            ..LocalizationOptions::default()
        };
        let timeline = config
            .devtools_enabled()
            .then(|| Timeline::new(config.timeline_capacity()));

        let mut i18n = Self::with_timeline(options, timeline);
        i18n.render_mode = config.render_mode();
        i18n.local_fallback_root = config.fallback_root;
        Ok(i18n)
    }

    /// The root instance.
    #[must_use]
    pub fn global(&self) -> &Localization {
        &self.global
    }

    #[must_use]
    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Render mode the configuration asks the host to use.
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Builds the lifecycle callbacks binding components to this context.
    #[must_use]
    pub fn mixin(&self) -> I18nMixin {
        let mut mixin = I18nMixin::new(
            self.global.clone(),
            self.global.composer_ref(),
            self.registry.clone(),
        );
        if let Some(timeline) = &self.timeline {
            mixin = mixin.with_timeline(timeline);
        }
        if let Some(fallback_root) = self.local_fallback_root {
            mixin = mixin.with_local_fallback_root(fallback_root);
        }
        mixin
    }

    /// The instance bound to `component`, if it is live.
    #[must_use]
    pub fn instance_for(&self, component: ComponentId) -> Option<Localization> {
        self.registry.get_instance(component)
    }
}
