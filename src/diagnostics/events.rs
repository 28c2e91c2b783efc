// SPDX-License-Identifier: MPL-2.0
//! Localization event types forwarded to the devtools timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::component::InstanceId;

/// A state change of a localization instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nEvent {
    /// Wall clock time the event was emitted.
    pub timestamp: DateTime<Utc>,
    /// Raw [`InstanceId`] of the emitting instance.
    pub instance: u64,
    pub kind: I18nEventKind,
}

impl I18nEvent {
    /// Creates a new event with the current timestamp.
    #[must_use]
    pub fn new(instance: InstanceId, kind: I18nEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            instance: instance.value(),
            kind,
        }
    }

    /// Event name handlers subscribe to.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// The type and associated data of an [`I18nEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum I18nEventKind {
    /// A key resolved to a message.
    Translate { key: String, locale: String },

    /// A key resolved in no locale of the chain.
    TranslateMissing { key: String, locale: String },

    /// A key resolved in a fallback locale.
    TranslateFallback {
        key: String,
        from: String,
        to: String,
    },

    /// A resolved message failed to compile.
    CompileError {
        key: String,
        locale: String,
        message: String,
    },

    LocaleChanged { from: String, to: String },

    /// Messages were merged into a locale's catalog.
    MessagesMerged { locale: String, count: usize },
}

impl I18nEventKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Translate { .. } => "translate",
            Self::TranslateMissing { .. } => "translate:missing",
            Self::TranslateFallback { .. } => "translate:fallback",
            Self::CompileError { .. } => "message:compilation-error",
            Self::LocaleChanged { .. } => "locale:changed",
            Self::MessagesMerged { .. } => "messages:merged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_namespaced() {
        let missing = I18nEventKind::TranslateMissing {
            key: "a".into(),
            locale: "en".into(),
        };
        assert_eq!(missing.name(), "translate:missing");
        let fallback = I18nEventKind::TranslateFallback {
            key: "a".into(),
            from: "fr".into(),
            to: "en".into(),
        };
        assert_eq!(fallback.name(), "translate:fallback");
    }

    #[test]
    fn event_carries_instance_id() {
        let id = InstanceId::next();
        let event = I18nEvent::new(
            id,
            I18nEventKind::LocaleChanged {
                from: "en".into(),
                to: "fr".into(),
            },
        );
        assert_eq!(event.instance, id.value());
        assert_eq!(event.name(), "locale:changed");
    }
}
