// SPDX-License-Identifier: MPL-2.0
//! Timeline recorder receiving every localization event while components are mounted.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::{CircularBuffer, EventHandler, I18nEvent};
use crate::domain::diagnostics::TimelineCapacity;
use crate::error::Result;

/// Shared, bounded record of [`I18nEvent`]s. Clones refer to the same record.
#[derive(Debug, Clone)]
pub struct Timeline {
    events: Rc<RefCell<CircularBuffer<I18nEvent>>>,
}

#[derive(Serialize)]
struct TimelineExport<'a> {
    events: Vec<&'a I18nEvent>,
}

impl Timeline {
    #[must_use]
    pub fn new(capacity: TimelineCapacity) -> Self {
        Self {
            events: Rc::new(RefCell::new(CircularBuffer::new(capacity))),
        }
    }

    pub fn record(&self, event: &I18nEvent) {
        self.events.borrow_mut().push(event.clone());
    }

    /// Builds a handler forwarding events into this timeline.
    ///
    /// Each call returns a distinct handler; keep the one passed to
    /// [`Emitter::on`](super::Emitter::on) to unsubscribe it later.
    #[must_use]
    pub fn recorder(&self) -> EventHandler {
        let timeline = self.clone();
        Rc::new(move |event: &I18nEvent| timeline.record(event))
    }

    #[must_use]
    pub fn events(&self) -> Vec<I18nEvent> {
        self.events.borrow().iter().cloned().collect()
    }

    /// Names of the recorded events, oldest first.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(I18nEvent::name).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Serializes the recorded events as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if serialization fails.
    pub fn export_toml(&self) -> Result<String> {
        let events = self.events.borrow();
        let export = TimelineExport {
            events: events.iter().collect(),
        };
        Ok(toml::to_string_pretty(&export)?)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(TimelineCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Emitter, I18nEventKind, WILDCARD};
    use crate::domain::component::InstanceId;

    fn locale_changed() -> I18nEvent {
        I18nEvent::new(
            InstanceId::next(),
            I18nEventKind::LocaleChanged {
                from: "en".into(),
                to: "fr".into(),
            },
        )
    }

    #[test]
    fn recorder_forwards_emitted_events() {
        let timeline = Timeline::default();
        let emitter = Emitter::new();
        emitter.on(WILDCARD, timeline.recorder());

        emitter.emit(&locale_changed());

        assert_eq!(timeline.event_names(), vec!["locale:changed"]);
    }

    #[test]
    fn clones_share_the_record() {
        let timeline = Timeline::default();
        let clone = timeline.clone();
        clone.record(&locale_changed());
        assert_eq!(timeline.len(), 1);
        timeline.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn export_lists_events() {
        let timeline = Timeline::default();
        timeline.record(&locale_changed());

        let exported = timeline.export_toml().expect("export succeeds");

        assert!(exported.contains("locale_changed"));
        assert!(exported.contains("[[events]]"));
    }
}
