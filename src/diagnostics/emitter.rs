// SPDX-License-Identifier: MPL-2.0
//! Publish/subscribe channel between localization instances and devtools.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::I18nEvent;

/// Pattern matching every event name.
pub const WILDCARD: &str = "*";

/// Event callback. Handlers are compared by identity on [`Emitter::off`].
pub type EventHandler = Rc<dyn Fn(&I18nEvent)>;

/// Shared event emitter. Clones refer to the same subscriber list.
#[derive(Clone, Default)]
pub struct Emitter {
    handlers: Rc<RefCell<Vec<(String, EventHandler)>>>,
}

impl Emitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to events named `pattern`, or all events with [`WILDCARD`].
    pub fn on(&self, pattern: &str, handler: EventHandler) {
        self.handlers.borrow_mut().push((pattern.to_string(), handler));
    }

    /// Removes one subscription of `handler` under `pattern`.
    ///
    /// Returns whether a subscription was removed.
    pub fn off(&self, pattern: &str, handler: &EventHandler) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let position = handlers.iter().position(|(subscribed, existing)| {
            subscribed == pattern && std::ptr::addr_eq(Rc::as_ptr(existing), Rc::as_ptr(handler))
        });
        match position {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Delivers `event` to every matching subscriber.
    pub fn emit(&self, event: &I18nEvent) {
        // Handlers may subscribe or unsubscribe while running.
        let matching: Vec<EventHandler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(pattern, _)| pattern == WILDCARD || pattern == event.name())
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in matching {
            handler(event);
        }
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Whether both emitters share the same subscriber list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Emitter) -> bool {
        Rc::ptr_eq(&self.handlers, &other.handlers)
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::I18nEventKind;
    use crate::domain::component::InstanceId;
    use std::cell::Cell;

    fn missing_event() -> I18nEvent {
        I18nEvent::new(
            InstanceId::next(),
            I18nEventKind::TranslateMissing {
                key: "k".into(),
                locale: "en".into(),
            },
        )
    }

    fn counter() -> (Rc<Cell<usize>>, EventHandler) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let handler: EventHandler = Rc::new(move |_| seen.set(seen.get() + 1));
        (count, handler)
    }

    #[test]
    fn wildcard_receives_every_event() {
        let emitter = Emitter::new();
        let (count, handler) = counter();
        emitter.on(WILDCARD, handler);

        emitter.emit(&missing_event());
        emitter.emit(&missing_event());

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn named_subscription_filters_events() {
        let emitter = Emitter::new();
        let (count, handler) = counter();
        emitter.on("locale:changed", handler);

        emitter.emit(&missing_event());

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn off_removes_by_identity() {
        let emitter = Emitter::new();
        let (count, handler) = counter();
        let (_, other) = counter();
        emitter.on(WILDCARD, Rc::clone(&handler));

        assert!(!emitter.off(WILDCARD, &other));
        assert!(!emitter.off("translate", &handler));
        assert!(emitter.off(WILDCARD, &handler));
        assert_eq!(emitter.handler_count(), 0);

        emitter.emit(&missing_event());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn handler_may_unsubscribe_itself() {
        let emitter = Emitter::new();
        let slot: Rc<RefCell<Option<EventHandler>>> = Rc::new(RefCell::new(None));
        let inner_emitter = emitter.clone();
        let inner_slot = Rc::clone(&slot);
        let handler: EventHandler = Rc::new(move |_| {
            if let Some(me) = inner_slot.borrow().as_ref() {
                inner_emitter.off(WILDCARD, me);
            }
        });
        *slot.borrow_mut() = Some(Rc::clone(&handler));
        emitter.on(WILDCARD, handler);

        emitter.emit(&missing_event());

        assert_eq!(emitter.handler_count(), 0);
    }

    #[test]
    fn clones_share_subscribers() {
        let emitter = Emitter::new();
        let clone = emitter.clone();
        let (_, handler) = counter();
        clone.on(WILDCARD, handler);
        assert_eq!(emitter.handler_count(), 1);
        assert!(emitter.ptr_eq(&clone));
        assert!(!emitter.ptr_eq(&Emitter::new()));
    }
}
