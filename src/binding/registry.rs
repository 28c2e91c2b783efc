// SPDX-License-Identifier: MPL-2.0
//! Lookup from component identity to its bound localization instance.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::component::ComponentId;
use crate::i18n::Localization;

/// Shared registry of bindings. Clones refer to the same registry.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    instances: Rc<RefCell<HashMap<ComponentId, Localization>>>,
}

impl InstanceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `component` to `instance`, replacing a stale entry.
    pub fn set_instance(&self, component: ComponentId, instance: Localization) {
        let previous = self.instances.borrow_mut().insert(component, instance);
        if previous.is_some() {
            tracing::warn!(%component, "component was already bound, replacing its instance");
        }
    }

    /// Removes the entry of `component`. Returns whether one existed.
    pub fn delete_instance(&self, component: ComponentId) -> bool {
        self.instances.borrow_mut().remove(&component).is_some()
    }

    #[must_use]
    pub fn get_instance(&self, component: ComponentId) -> Option<Localization> {
        self.instances.borrow().get(&component).cloned()
    }

    #[must_use]
    pub fn contains(&self, component: ComponentId) -> bool {
        self.instances.borrow().contains_key(&component)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocalizationOptions;

    #[test]
    fn set_get_delete() {
        let registry = InstanceRegistry::new();
        let root = Localization::new_global(LocalizationOptions::new());
        let id = ComponentId::new(1);

        registry.set_instance(id, root.clone());
        assert!(registry.get_instance(id).unwrap().ptr_eq(&root));
        assert_eq!(registry.len(), 1);

        assert!(registry.delete_instance(id));
        assert!(!registry.delete_instance(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn set_keeps_one_entry_per_component() {
        let registry = InstanceRegistry::new();
        let first = Localization::new_local(LocalizationOptions::new());
        let second = Localization::new_local(LocalizationOptions::new());
        let id = ComponentId::new(5);

        registry.set_instance(id, first);
        registry.set_instance(id, second.clone());

        assert_eq!(registry.len(), 1);
        assert!(registry.get_instance(id).unwrap().ptr_eq(&second));
    }

    #[test]
    fn clones_share_entries() {
        let registry = InstanceRegistry::new();
        let view = registry.clone();
        registry.set_instance(
            ComponentId::new(2),
            Localization::new_local(LocalizationOptions::new()),
        );
        assert!(view.contains(ComponentId::new(2)));
    }
}
