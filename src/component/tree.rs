// SPDX-License-Identifier: MPL-2.0
//! A minimal component tree driving the lifecycle of its nodes.
//!
//! The tree owns its nodes and calls every registered [`LifecycleHooks`]
//! implementation at each phase, handing it the node through a
//! [`HookContext`].

use std::collections::BTreeMap;
use std::rc::Rc;

use super::{ComponentNode, ComponentOptions, HookContext, LifecycleHooks, RootElement};
use crate::domain::component::{ComponentId, RenderMode};
use crate::error::{Error, Result};

/// Tag of the element attached to every mounted node.
const ELEMENT_TAG: &str = "div";

pub struct ComponentTree {
    nodes: BTreeMap<ComponentId, ComponentNode>,
    hooks: Vec<Rc<dyn LifecycleHooks>>,
    render_mode: RenderMode,
}

impl std::fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentTree")
            .field("nodes", &self.nodes.len())
            .field("hooks", &self.hooks.len())
            .field("render_mode", &self.render_mode)
            .finish()
    }
}

impl ComponentTree {
    #[must_use]
    pub fn new(render_mode: RenderMode) -> Self {
        Self {
            nodes: BTreeMap::new(),
            hooks: Vec::new(),
            render_mode,
        }
    }

    /// Attaches lifecycle callbacks to every component created afterwards.
    pub fn register_hooks(&mut self, hooks: Rc<dyn LifecycleHooks>) {
        self.hooks.push(hooks);
    }

    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Creates a node under `parent` (or a root when `None`) and runs the
    /// pre-creation hooks on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownComponent`] when `parent` is not a live node,
    /// or the first error raised by a hook. The node is discarded on error,
    /// after the hooks that already ran have released it.
    pub fn create(
        &mut self,
        parent: Option<ComponentId>,
        options: ComponentOptions,
    ) -> Result<ComponentId> {
        if let Some(parent) = parent {
            if !self.nodes.contains_key(&parent) {
                return Err(Error::UnknownComponent(parent));
            }
        }

        let id = ComponentId::next();

        let mut node = ComponentNode::new(id, parent, options);
        for (ran, hooks) in self.hooks.iter().enumerate() {
            let created = hooks.before_create(&mut HookContext::new(&mut node, self.render_mode));
            if let Err(err) = created {
                for hooks in self.hooks[..ran].iter().rev() {
                    let released =
                        hooks.before_unmount(&mut HookContext::new(&mut node, self.render_mode));
                    if let Err(release_err) = released {
                        tracing::warn!(component = %id, "failed to release discarded component: {release_err}");
                    }
                }
                return Err(err);
            }
        }

        tracing::trace!(component = %id, name = node.name(), "component created");
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Mounts a node: attaches its root element and runs the post-mount hooks.
    ///
    /// Server rendering never mounts, so this is a no-op in that mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownComponent`] when `id` is not a live node.
    pub fn mount(&mut self, id: ComponentId) -> Result<()> {
        let render_mode = self.render_mode;
        let node = self.nodes.get_mut(&id).ok_or(Error::UnknownComponent(id))?;
        if !render_mode.is_interactive() {
            return Ok(());
        }

        node.attach_element(RootElement::new(ELEMENT_TAG));
        for hooks in &self.hooks {
            hooks.mounted(&mut HookContext::new(node, render_mode));
        }
        Ok(())
    }

    /// Unmounts and destroys a node and its whole subtree.
    ///
    /// Descendants are destroyed first, deepest nodes before their parents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownComponent`] when `id` is not a live node, or
    /// the first error raised by a hook.
    pub fn unmount(&mut self, id: ComponentId) -> Result<()> {
        if !self.nodes.contains_key(&id) {
            return Err(Error::UnknownComponent(id));
        }
        for child in self.children(id) {
            self.unmount(child)?;
        }

        let render_mode = self.render_mode;
        let node = self.nodes.get_mut(&id).ok_or(Error::UnknownComponent(id))?;
        for hooks in &self.hooks {
            hooks.before_unmount(&mut HookContext::new(node, render_mode))?;
        }
        self.nodes.remove(&id);
        tracing::trace!(component = %id, "component destroyed");
        Ok(())
    }

    #[must_use]
    pub fn node(&self, id: ComponentId) -> Option<&ComponentNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: ComponentId) -> Option<&mut ComponentNode> {
        self.nodes.get_mut(&id)
    }

    /// Live children of `id`, in creation order.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> Vec<ComponentId> {
        self.nodes
            .values()
            .filter(|node| node.parent() == Some(id))
            .map(ComponentNode::id)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl LifecycleHooks for Recorder {
        fn before_create(&self, ctx: &mut HookContext<'_>) -> Result<()> {
            let id = ctx.current_instance().map(|node| node.id());
            self.calls.borrow_mut().push(format!("create {id:?}"));
            Ok(())
        }

        fn mounted(&self, ctx: &mut HookContext<'_>) {
            let attached = ctx
                .current_instance()
                .is_some_and(|node| node.element().is_some());
            self.calls.borrow_mut().push(format!("mounted {attached}"));
        }

        fn before_unmount(&self, ctx: &mut HookContext<'_>) -> Result<()> {
            let name = ctx
                .current_instance()
                .map(|node| node.name().to_string())
                .unwrap_or_default();
            self.calls.borrow_mut().push(format!("unmount {name}"));
            Ok(())
        }
    }

    fn tree_with_recorder(mode: RenderMode) -> (ComponentTree, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        let mut tree = ComponentTree::new(mode);
        tree.register_hooks(recorder.clone());
        (tree, recorder)
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let (mut tree, recorder) = tree_with_recorder(RenderMode::Interactive);
        let root = tree.create(None, ComponentOptions::named("app")).unwrap();
        let child = tree.create(Some(root), ComponentOptions::named("child")).unwrap();

        assert!(child > root);
        assert!(tree.node(root).unwrap().is_root());
        assert_eq!(tree.children(root), vec![child]);
        assert_eq!(recorder.calls.borrow().len(), 2);
    }

    #[test]
    fn ids_are_unique_across_trees() {
        let (mut first, _) = tree_with_recorder(RenderMode::Interactive);
        let (mut second, _) = tree_with_recorder(RenderMode::Interactive);
        let a = first.create(None, ComponentOptions::named("a")).unwrap();
        let b = second.create(None, ComponentOptions::named("b")).unwrap();
        assert_ne!(a, b);
    }

    struct Rejecting;

    impl LifecycleHooks for Rejecting {
        fn before_create(&self, _ctx: &mut HookContext<'_>) -> Result<()> {
            Err(Error::Config("rejected".into()))
        }
    }

    #[test]
    fn failed_creation_releases_earlier_hooks() {
        let (mut tree, recorder) = tree_with_recorder(RenderMode::Interactive);
        tree.register_hooks(Rc::new(Rejecting));

        let err = tree.create(None, ComponentOptions::named("app")).unwrap_err();

        assert_eq!(err, Error::Config("rejected".into()));
        assert!(tree.is_empty());
        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], "unmount app");
    }

    #[test]
    fn create_rejects_unknown_parent() {
        let (mut tree, _) = tree_with_recorder(RenderMode::Interactive);
        let err = tree
            .create(Some(ComponentId::new(42)), ComponentOptions::default())
            .unwrap_err();
        assert_eq!(err, Error::UnknownComponent(ComponentId::new(42)));
        assert!(tree.is_empty());
    }

    #[test]
    fn mount_attaches_element_before_hooks() {
        let (mut tree, recorder) = tree_with_recorder(RenderMode::Interactive);
        let root = tree.create(None, ComponentOptions::default()).unwrap();
        tree.mount(root).unwrap();

        assert!(tree.node(root).unwrap().element().is_some());
        assert_eq!(recorder.calls.borrow().last().unwrap(), "mounted true");
    }

    #[test]
    fn server_rendering_never_mounts() {
        let (mut tree, recorder) = tree_with_recorder(RenderMode::Server);
        let root = tree.create(None, ComponentOptions::default()).unwrap();
        tree.mount(root).unwrap();

        assert!(tree.node(root).unwrap().element().is_none());
        assert_eq!(recorder.calls.borrow().len(), 1);
    }

    #[test]
    fn unmount_destroys_subtree_children_first() {
        let (mut tree, recorder) = tree_with_recorder(RenderMode::Interactive);
        let root = tree.create(None, ComponentOptions::named("app")).unwrap();
        let child = tree.create(Some(root), ComponentOptions::named("child")).unwrap();
        tree.create(Some(child), ComponentOptions::named("leaf")).unwrap();
        recorder.calls.borrow_mut().clear();

        tree.unmount(root).unwrap();

        assert!(tree.is_empty());
        assert_eq!(
            *recorder.calls.borrow(),
            vec!["unmount leaf", "unmount child", "unmount app"]
        );
    }

    #[test]
    fn unmount_unknown_node_fails() {
        let (mut tree, _) = tree_with_recorder(RenderMode::Interactive);
        assert!(matches!(
            tree.unmount(ComponentId::new(9)),
            Err(Error::UnknownComponent(_))
        ));
    }
}
