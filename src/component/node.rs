// SPDX-License-Identifier: MPL-2.0
//! Component nodes of the host tree and the slots the binder fills.

use serde::Deserialize;

use crate::binding::I18nApi;
use crate::diagnostics::Emitter;
use crate::domain::component::ComponentId;
use crate::i18n::{ComposerRef, I18nFragment, InlineBlock, Localization, LocalizationOptions};

/// Property under which devtools discover the formatting engine of a
/// mounted element.
pub const DEVTOOLS_PROPERTY: &str = "__INTLIFY__";

/// What a component declares at definition time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentOptions {
    pub name: Option<String>,
    /// Structured localization options.
    pub i18n: Option<LocalizationOptions>,
    /// Inline message blocks attached to the definition.
    pub i18n_blocks: Vec<InlineBlock>,
}

impl ComponentOptions {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_i18n(mut self, options: LocalizationOptions) -> Self {
        self.i18n = Some(options);
        self
    }

    #[must_use]
    pub fn with_blocks(mut self, blocks: Vec<InlineBlock>) -> Self {
        self.i18n_blocks = blocks;
        self
    }

    /// The normalized localization fragment, if the component declares one.
    #[must_use]
    pub fn fragment(&self) -> Option<I18nFragment> {
        I18nFragment::from_declaration(self.i18n.as_ref(), &self.i18n_blocks)
    }
}

/// The rendered root element of a mounted component.
#[derive(Debug, Clone)]
pub struct RootElement {
    tag: String,
    devtools_instance: Option<ComposerRef>,
}

impl RootElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            devtools_instance: None,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Engine exposed under [`DEVTOOLS_PROPERTY`], if any.
    #[must_use]
    pub fn devtools_instance(&self) -> Option<&ComposerRef> {
        self.devtools_instance.as_ref()
    }

    pub(crate) fn expose_devtools_instance(&mut self, composer: ComposerRef) {
        self.devtools_instance = Some(composer);
    }

    pub(crate) fn remove_devtools_instance(&mut self) {
        self.devtools_instance = None;
    }
}

/// A live node of the component tree.
#[derive(Debug)]
pub struct ComponentNode {
    id: ComponentId,
    parent: Option<ComponentId>,
    options: ComponentOptions,
    element: Option<RootElement>,
    i18n: Option<Localization>,
    api: Option<I18nApi>,
    emitter: Option<Emitter>,
}

impl ComponentNode {
    #[must_use]
    pub fn new(id: ComponentId, parent: Option<ComponentId>, options: ComponentOptions) -> Self {
        Self {
            id,
            parent,
            options,
            element: None,
            i18n: None,
            api: None,
            emitter: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[must_use]
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Whether this node is the root of its tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[must_use]
    pub fn options(&self) -> &ComponentOptions {
        &self.options
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.options.name.as_deref().unwrap_or("anonymous")
    }

    #[must_use]
    pub fn element(&self) -> Option<&RootElement> {
        self.element.as_ref()
    }

    pub fn element_mut(&mut self) -> Option<&mut RootElement> {
        self.element.as_mut()
    }

    pub fn attach_element(&mut self, element: RootElement) {
        self.element = Some(element);
    }

    /// The bound localization instance.
    #[must_use]
    pub fn i18n(&self) -> Option<&Localization> {
        self.i18n.as_ref()
    }

    /// The exposed translation API.
    #[must_use]
    pub fn i18n_api(&self) -> Option<&I18nApi> {
        self.api.as_ref()
    }

    #[must_use]
    pub fn emitter(&self) -> Option<&Emitter> {
        self.emitter.as_ref()
    }

    pub(crate) fn set_i18n(&mut self, i18n: Localization) {
        self.i18n = Some(i18n);
    }

    pub(crate) fn take_i18n(&mut self) -> Option<Localization> {
        self.i18n.take()
    }

    pub(crate) fn install_api(&mut self, api: I18nApi) {
        self.api = Some(api);
    }

    pub(crate) fn remove_api(&mut self) -> Option<I18nApi> {
        self.api.take()
    }

    pub(crate) fn set_emitter(&mut self, emitter: Emitter) {
        self.emitter = Some(emitter);
    }

    pub(crate) fn take_emitter(&mut self) -> Option<Emitter> {
        self.emitter.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_without_parent_is_root() {
        let root = ComponentNode::new(ComponentId::new(1), None, ComponentOptions::default());
        let child = ComponentNode::new(
            ComponentId::new(2),
            Some(root.id()),
            ComponentOptions::named("child"),
        );
        assert!(root.is_root());
        assert!(!child.is_root());
        assert_eq!(child.name(), "child");
        assert_eq!(root.name(), "anonymous");
    }

    #[test]
    fn options_without_i18n_have_no_fragment() {
        assert!(ComponentOptions::named("plain").fragment().is_none());
    }

    #[test]
    fn options_deserialize_from_toml() {
        let options: ComponentOptions = toml::from_str(
            r#"
            name = "greeter"

            [[i18n_blocks]]
            locale = "fr"
            resource = { hello = "Salut" }
            "#,
        )
        .expect("valid options");
        assert_eq!(options.name.as_deref(), Some("greeter"));
        assert!(matches!(options.fragment(), Some(I18nFragment::Inline(_))));
    }

    #[test]
    fn element_devtools_property_round_trip() {
        let mut element = RootElement::new("div");
        let i18n = Localization::new_global(LocalizationOptions::new());
        element.expose_devtools_instance(i18n.composer_ref());
        assert!(element.devtools_instance().is_some());
        element.remove_devtools_instance();
        assert!(element.devtools_instance().is_none());
        assert_eq!(element.tag(), "div");
    }
}
