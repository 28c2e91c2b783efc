// SPDX-License-Identifier: MPL-2.0
//! Diagnostics bridge between localization instances and devtools.
//!
//! Localization instances publish their state changes on an [`Emitter`]
//! while a component holding them is mounted. The lifecycle binder
//! subscribes a [`Timeline`] recorder to every event and unsubscribes it
//! again when the component is torn down.
//!
//! # Architecture
//!
//! - [`Emitter`]: Publish/subscribe channel with a `*` wildcard pattern
//! - [`I18nEvent`]: Timestamped localization event
//! - [`CircularBuffer`]: Ring buffer bounding the timeline memory
//! - [`Timeline`]: Recorder the events are forwarded to

mod buffer;
mod emitter;
mod events;
mod timeline;

pub use buffer::CircularBuffer;
pub use emitter::{Emitter, EventHandler, WILDCARD};
pub use events::{I18nEvent, I18nEventKind};
pub use timeline::Timeline;
