// SPDX-License-Identifier: MPL-2.0
//! Declarative component scenes driven through a [`ComponentTree`].
//!
//! A scene lists components (parents before children) and the translations
//! to render once the tree is mounted:
//!
//! ```toml
//! [[components]]
//! name = "app"
//!
//! [[components]]
//! name = "cart"
//! parent = "app"
//! i18n = { messages = { en-US = { total = "Total: { $amount }" } } }
//!
//! [[render]]
//! component = "cart"
//! key = "total"
//! params = { amount = "12" }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;

use crate::component::{ComponentNode, ComponentOptions, ComponentTree};
use crate::domain::component::ComponentId;
use crate::error::{Error, Result};
use crate::i18n::Params;
use crate::plugin::I18n;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub components: Vec<SceneComponent>,
    #[serde(default)]
    pub render: Vec<RenderCall>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneComponent {
    /// Name of the parent component; the tree root when absent.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(flatten)]
    pub options: ComponentOptions,
}

/// A translation rendered through a component's exposed API.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderCall {
    pub component: String,
    pub key: String,
    /// Renders with legacy pluralization when set.
    #[serde(default)]
    pub choice: Option<i64>,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub component: String,
    pub key: String,
    pub text: String,
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} = {}", self.component, self.key, self.text)
    }
}

impl Scene {
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `source` is not a valid scene.
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| Error::Config(format!("invalid scene: {err}")))
    }

    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid scene.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Creates and mounts every component, renders the listed translations,
    /// then tears the whole tree down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a parent or rendered component is not
    /// declared before use, or any error raised by the component lifecycle.
    pub fn run(&self, i18n: &I18n) -> Result<Vec<RenderedLine>> {
        let mut tree = ComponentTree::new(i18n.render_mode());
        tree.register_hooks(Rc::new(i18n.mixin()));

        let mut created = Vec::with_capacity(self.components.len());
        let mut by_name: HashMap<&str, ComponentId> = HashMap::new();
        for component in &self.components {
            let parent = match component.parent.as_deref() {
                Some(name) => Some(lookup(&by_name, name)?),
                None => None,
            };
            let id = tree.create(parent, component.options.clone())?;
            if let Some(name) = component.options.name.as_deref() {
                by_name.insert(name, id);
            }
            created.push(id);
        }
        for id in &created {
            tree.mount(*id)?;
        }

        let mut lines = Vec::with_capacity(self.render.len());
        for call in &self.render {
            let id = lookup(&by_name, &call.component)?;
            let api = tree
                .node(id)
                .and_then(ComponentNode::i18n_api)
                .ok_or(Error::UnknownComponent(id))?;
            let text = match call.choice {
                Some(choice) => api.tc(&call.key, choice, &call.params),
                None => api.t(&call.key, &call.params),
            };
            lines.push(RenderedLine {
                component: call.component.clone(),
                key: call.key.clone(),
                text,
            });
        }

        let roots: Vec<ComponentId> = created
            .iter()
            .copied()
            .filter(|id| tree.node(*id).is_some_and(ComponentNode::is_root))
            .collect();
        for root in roots.into_iter().rev() {
            tree.unmount(root)?;
        }
        Ok(lines)
    }
}

fn lookup(by_name: &HashMap<&str, ComponentId>, name: &str) -> Result<ComponentId> {
    by_name
        .get(name)
        .copied()
        .ok_or_else(|| Error::Config(format!("component `{name}` is not declared")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LocalizationOptions, MessageTree, MessageValue};

    const SCENE: &str = r#"
        [[components]]
        name = "app"

        [[components]]
        name = "cart"
        parent = "app"

        [components.i18n.messages.en]
        total = "Total: { $amount }"

        [[components]]
        name = "footer"
        parent = "app"

        [[render]]
        component = "cart"
        key = "total"
        params = { amount = "12" }

        [[render]]
        component = "footer"
        key = "apple"
        choice = 2
    "#;

    fn i18n() -> I18n {
        I18n::with_timeline(
            LocalizationOptions::new().with_locale("en").with_messages(
                "en",
                MessageTree::from([(
                    "apple".to_string(),
                    MessageValue::from("no apples | one apple | { $count } apples"),
                )]),
            ),
            None,
        )
    }

    #[test]
    fn scene_renders_through_bound_components() {
        let i18n = i18n();
        let lines = Scene::parse(SCENE).unwrap().run(&i18n).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Total: 12");
        assert_eq!(lines[1].text, "2 apples");
        assert_eq!(lines[1].to_string(), "[footer] apple = 2 apples");
        assert!(i18n.registry().is_empty());
    }

    #[test]
    fn undeclared_parent_is_rejected() {
        let scene = Scene::parse(
            r#"
            [[components]]
            name = "orphan"
            parent = "nowhere"
            "#,
        )
        .unwrap();
        assert!(matches!(scene.run(&i18n()), Err(Error::Config(_))));
    }

    #[test]
    fn invalid_scene_fails_to_parse() {
        assert!(matches!(Scene::parse("components = 3"), Err(Error::Config(_))));
    }
}
