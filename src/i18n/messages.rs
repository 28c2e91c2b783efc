// SPDX-License-Identifier: MPL-2.0
//! Message catalogs: nested message trees keyed per locale.
//!
//! A catalog maps a locale (`"fr"`, `"en-US"`) to a [`MessageTree`]. Trees
//! nest arbitrarily and are addressed with dotted paths (`"menu.file.open"`),
//! list entries with an index (`"steps[1]"` or `"steps.1"`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Messages of a single locale.
pub type MessageTree = BTreeMap<String, MessageValue>;

/// Messages of every locale, keyed by locale.
pub type LocaleMessages = BTreeMap<String, MessageTree>;

/// A node of a message tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    Text(String),
    List(Vec<MessageValue>),
    Tree(MessageTree),
}

impl MessageValue {
    /// The empty tree returned by raw lookups that resolve nothing.
    #[must_use]
    pub fn empty() -> Self {
        MessageValue::Tree(MessageTree::new())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageValue::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            MessageValue::Text(text) => text.is_empty(),
            MessageValue::List(items) => items.is_empty(),
            MessageValue::Tree(tree) => tree.is_empty(),
        }
    }
}

impl From<&str> for MessageValue {
    fn from(text: &str) -> Self {
        MessageValue::Text(text.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(text: String) -> Self {
        MessageValue::Text(text)
    }
}

impl From<MessageTree> for MessageValue {
    fn from(tree: MessageTree) -> Self {
        MessageValue::Tree(tree)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

fn parse_path(path: &str) -> Option<Vec<PathSegment<'_>>> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (key, mut rest) = match part.find('[') {
            Some(pos) => part.split_at(pos),
            None => (part, ""),
        };
        if key.is_empty() && rest.is_empty() {
            return None;
        }
        if !key.is_empty() {
            segments.push(PathSegment::Key(key));
        }
        while !rest.is_empty() {
            let close = rest.find(']')?;
            let index = rest.get(1..close)?.trim().parse().ok()?;
            segments.push(PathSegment::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return None;
            }
        }
    }
    Some(segments)
}

/// Resolves a dotted message path inside a tree.
#[must_use]
pub fn resolve_path<'a>(tree: &'a MessageTree, path: &str) -> Option<&'a MessageValue> {
    let segments = parse_path(path)?;
    let (first, rest) = segments.split_first()?;
    let mut current = match first {
        PathSegment::Key(key) => tree.get(*key)?,
        PathSegment::Index(_) => return None,
    };
    for segment in rest {
        current = match (current, segment) {
            (MessageValue::Tree(node), PathSegment::Key(key)) => node.get(*key)?,
            (MessageValue::List(items), PathSegment::Key(key)) => {
                items.get(key.parse::<usize>().ok()?)?
            }
            (MessageValue::List(items), PathSegment::Index(index)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Merges `source` into `target` entry by entry.
///
/// Nested trees merge recursively; any other value in `source` replaces the
/// entry of `target`. Keys absent from `source` are left untouched.
pub fn deep_merge(target: &mut MessageTree, source: &MessageTree) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(MessageValue::Tree(existing)), MessageValue::Tree(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Counts the text leaves of a tree.
#[must_use]
pub fn count_messages(tree: &MessageTree) -> usize {
    fn count(value: &MessageValue) -> usize {
        match value {
            MessageValue::Text(_) => 1,
            MessageValue::List(items) => items.iter().map(count).sum(),
            MessageValue::Tree(tree) => tree.values().map(count).sum(),
        }
    }
    tree.values().map(count).sum()
}

/// A message block declared inline with a component.
///
/// With a `locale`, `resource` holds that locale's messages. Without one,
/// the top-level keys of `resource` are locales.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InlineBlock {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub resource: MessageTree,
}

impl InlineBlock {
    /// A block holding the messages of one locale.
    #[must_use]
    pub fn for_locale(locale: impl Into<String>, resource: MessageTree) -> Self {
        Self {
            locale: Some(locale.into()),
            resource,
        }
    }

    /// A block whose top-level keys are locales.
    #[must_use]
    pub fn per_locale(resource: MessageTree) -> Self {
        Self {
            locale: None,
            resource,
        }
    }

    /// Parses a block from its TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] when the source is not a valid message table.
    pub fn parse(locale: Option<&str>, source: &str) -> Result<Self> {
        let resource: MessageTree = toml::from_str(source)
            .map_err(|err| Error::Catalog(format!("invalid inline message block: {err}")))?;
        Ok(Self {
            locale: locale.map(str::to_string),
            resource,
        })
    }
}

/// Resolves declared messages and inline blocks into per-locale catalogs.
///
/// `locale` anchors the result when nothing is declared: the catalog then
/// holds a single empty tree for that locale.
#[must_use]
pub fn resolve_locale_messages(
    locale: &str,
    messages: Option<&LocaleMessages>,
    blocks: &[InlineBlock],
) -> LocaleMessages {
    let mut resolved = match messages {
        Some(messages) => messages.clone(),
        None if !blocks.is_empty() => LocaleMessages::new(),
        None => LocaleMessages::from([(locale.to_string(), MessageTree::new())]),
    };

    for block in blocks {
        match &block.locale {
            Some(block_locale) => {
                let target = resolved.entry(block_locale.clone()).or_default();
                deep_merge(target, &block.resource);
            }
            None => {
                for (block_locale, value) in &block.resource {
                    match value {
                        MessageValue::Tree(tree) => {
                            let target = resolved.entry(block_locale.clone()).or_default();
                            deep_merge(target, tree);
                        }
                        _ => tracing::warn!(
                            locale = %block_locale,
                            "inline block entry is not a message table, ignoring"
                        ),
                    }
                }
            }
        }
    }

    resolved
}
