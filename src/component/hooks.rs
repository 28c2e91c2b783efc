// SPDX-License-Identifier: MPL-2.0
//! Lifecycle hook contract between the host tree and its plugins.

use super::ComponentNode;
use crate::domain::component::RenderMode;
use crate::error::Result;

/// Invocation context of a lifecycle hook.
///
/// The host passes the component the hook runs for. A context without a
/// component signals a host integration defect.
#[derive(Debug)]
pub struct HookContext<'a> {
    instance: Option<&'a mut ComponentNode>,
    render_mode: RenderMode,
}

impl<'a> HookContext<'a> {
    #[must_use]
    pub fn new(instance: &'a mut ComponentNode, render_mode: RenderMode) -> Self {
        Self {
            instance: Some(instance),
            render_mode,
        }
    }

    /// A context with no current component.
    #[must_use]
    pub fn detached(render_mode: RenderMode) -> Self {
        Self {
            instance: None,
            render_mode,
        }
    }

    pub fn current_instance(&mut self) -> Option<&mut ComponentNode> {
        self.instance.as_deref_mut()
    }

    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }
}

/// Callbacks attached to every component definition.
///
/// Phases run synchronously, in order: `before_create`, `mounted`
/// (interactive rendering only), `before_unmount`.
pub trait LifecycleHooks {
    /// Runs before the component's own setup.
    ///
    /// # Errors
    ///
    /// Implementations fail only on a broken host contract.
    fn before_create(&self, _ctx: &mut HookContext<'_>) -> Result<()> {
        Ok(())
    }

    fn mounted(&self, _ctx: &mut HookContext<'_>) {}

    /// Runs before the component is destroyed.
    ///
    /// # Errors
    ///
    /// Implementations fail only on a broken host contract.
    fn before_unmount(&self, _ctx: &mut HookContext<'_>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentOptions;
    use crate::domain::component::ComponentId;

    #[test]
    fn detached_context_has_no_instance() {
        let mut ctx = HookContext::detached(RenderMode::Server);
        assert!(ctx.current_instance().is_none());
        assert_eq!(ctx.render_mode(), RenderMode::Server);
    }

    #[test]
    fn context_exposes_current_instance() {
        let mut node = ComponentNode::new(ComponentId::new(3), None, ComponentOptions::default());
        let mut ctx = HookContext::new(&mut node, RenderMode::Interactive);
        assert_eq!(ctx.current_instance().map(|n| n.id()), Some(ComponentId::new(3)));
    }
}
