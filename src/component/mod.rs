// SPDX-License-Identifier: MPL-2.0
//! Host component model: nodes, lifecycle hooks and the tree running them.

mod hooks;
mod node;
mod tree;

pub use hooks::{HookContext, LifecycleHooks};
pub use node::{ComponentNode, ComponentOptions, RootElement, DEVTOOLS_PROPERTY};
pub use tree::ComponentTree;
