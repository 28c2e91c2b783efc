// SPDX-License-Identifier: MPL-2.0
//! Lifecycle binder attaching localization instances to components.
//!
//! On creation every component is bound to an instance:
//!
//! | Declares options | Tree root | Bound instance |
//! |---|---|---|
//! | no | either | the root instance itself |
//! | yes | yes | the root instance, options merged into it |
//! | yes | no | a fresh local instance |
//!
//! While an interactive component is mounted, its instance publishes
//! diagnostics events to the devtools timeline.

use std::rc::Rc;

use super::{merge_to_root, I18nApi, InstanceRegistry};
use crate::component::{ComponentNode, HookContext, LifecycleHooks};
#[cfg(feature = "devtools")]
use crate::diagnostics::Emitter;
use crate::diagnostics::{EventHandler, Timeline, WILDCARD};
use crate::domain::component::LifecycleHook;
use crate::error::{Error, Result};
use crate::i18n::{ComposerRef, Localization};

/// Lifecycle callbacks shared by every component of an application.
pub struct I18nMixin {
    global: Localization,
    composer: ComposerRef,
    registry: InstanceRegistry,
    recorder: Option<EventHandler>,
    local_fallback_root: Option<bool>,
}

impl std::fmt::Debug for I18nMixin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18nMixin")
            .field("global", &self.global.id())
            .field("registry", &self.registry.len())
            .field("devtools", &self.recorder.is_some())
            .finish()
    }
}

impl I18nMixin {
    /// Builds the callbacks around the root instance, the engine local
    /// instances fall back to, and the registry bindings are recorded in.
    #[must_use]
    pub fn new(global: Localization, composer: ComposerRef, registry: InstanceRegistry) -> Self {
        Self {
            global,
            composer,
            registry,
            recorder: None,
            local_fallback_root: None,
        }
    }

    /// Forwards the events of mounted components to `timeline`.
    #[must_use]
    pub fn with_timeline(mut self, timeline: &Timeline) -> Self {
        self.recorder = Some(timeline.recorder());
        self
    }

    /// Default `fallback_root` of local instances that do not set it.
    #[must_use]
    pub fn with_local_fallback_root(mut self, fallback_root: bool) -> Self {
        self.local_fallback_root = Some(fallback_root);
        self
    }

    fn select_instance(&self, node: &ComponentNode) -> Localization {
        let Some(fragment) = node.options().fragment() else {
            return self.global.clone();
        };
        let mut options = fragment.into_options();
        if node.is_root() {
            return merge_to_root(&self.global, &options);
        }

        options.root = Some(Rc::clone(&self.composer));
        if options.fallback_root.is_none() {
            options.fallback_root = self.local_fallback_root;
        }
        Localization::new_local(options)
    }
}

impl LifecycleHooks for I18nMixin {
    fn before_create(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let node = ctx
            .current_instance()
            .ok_or(Error::NoActiveComponent(LifecycleHook::BeforeCreate))?;

        let i18n = self.select_instance(node);
        tracing::debug!(
            component = %node.id(),
            name = node.name(),
            instance = %i18n.id(),
            scope = ?i18n.scope(),
            "binding localization instance"
        );

        self.registry.set_instance(node.id(), i18n.clone());
        node.install_api(I18nApi::new(i18n.clone()));
        node.set_i18n(i18n.clone());
        self.global.on_component_instance_created(&i18n);
        Ok(())
    }

    #[cfg(feature = "devtools")]
    fn mounted(&self, ctx: &mut HookContext<'_>) {
        if !ctx.render_mode().is_interactive() {
            return;
        }
        let Some(recorder) = &self.recorder else {
            return;
        };
        let Some(node) = ctx.current_instance() else {
            return;
        };
        let Some(i18n) = node.i18n().cloned() else {
            return;
        };

        if let Some(element) = node.element_mut() {
            element.expose_devtools_instance(i18n.composer_ref());
        }
        let emitter = Emitter::new();
        i18n.enable_emitter(emitter.clone());
        emitter.on(WILDCARD, Rc::clone(recorder));
        tracing::trace!(component = %node.id(), "diagnostics attached");
        node.set_emitter(emitter);
    }

    fn before_unmount(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let node = ctx
            .current_instance()
            .ok_or(Error::NoActiveComponent(LifecycleHook::BeforeUnmount))?;

        if let Some(emitter) = node.take_emitter() {
            if let Some(recorder) = &self.recorder {
                emitter.off(WILDCARD, recorder);
            }
            if let Some(i18n) = node.i18n() {
                i18n.disable_emitter_if(&emitter);
            }
            if let Some(element) = node.element_mut() {
                element.remove_devtools_instance();
            }
            tracing::trace!(component = %node.id(), "diagnostics detached");
        }

        node.remove_api();
        self.registry.delete_instance(node.id());
        if node.take_i18n().is_some() {
            tracing::debug!(component = %node.id(), "released localization instance");
        }
        Ok(())
    }
}
