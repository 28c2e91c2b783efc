// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! This module provides the localization instances bound to components:
//! message catalogs, named formats, and the formatting engine rendering
//! messages with Fluent.
//!
//! # Features
//!
//! - Per-locale nested message trees, mergeable entry by entry
//! - Locale chains with explicit fallbacks and language-only fallback
//! - Legacy `a | b | c` pluralization
//! - Root instance shared by the whole component tree, local instances per component
//! - Locale detection from CLI, config, or system settings

pub mod composer;
pub mod fluent;
pub mod formats;
pub mod instance;
pub mod locale;
pub mod messages;
pub mod options;
pub mod params;

pub use composer::{Composer, ComposerRef, InstanceSettings};
pub use formats::{DateTimeFormat, NumberFormat, NumberStyle};
pub use instance::{Localization, Scope};
pub use messages::{InlineBlock, LocaleMessages, MessageTree, MessageValue};
pub use options::{
    I18nFragment, InstanceCreatedListener, LocalizationOptions, MissingHandler, PostTranslation,
    WarnHtmlLevel,
};
pub use params::{ParamValue, Params};
