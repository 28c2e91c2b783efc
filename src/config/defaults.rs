// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Locale**: Root locale and fallback chain
//! - **Instances**: Behavior of local localization instances
//! - **Diagnostics**: Devtools timeline sizing

use crate::domain::diagnostics::timeline_capacity_bounds;

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale used when nothing else resolves.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Fallback locale of the root instance when none is configured.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en-US";

// ==========================================================================
// Instance Defaults
// ==========================================================================

/// Local instances follow the root locale unless `sync = false`.
pub const DEFAULT_SYNC: bool = true;

/// Local instances resolve missing keys through the root instance.
pub const DEFAULT_FALLBACK_ROOT: bool = true;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of events kept by the devtools timeline.
pub const DEFAULT_TIMELINE_CAPACITY: usize = timeline_capacity_bounds::DEFAULT;

/// Minimum timeline capacity.
pub const MIN_TIMELINE_CAPACITY: usize = timeline_capacity_bounds::MIN;

/// Maximum timeline capacity.
pub const MAX_TIMELINE_CAPACITY: usize = timeline_capacity_bounds::MAX;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_defaults_within_bounds() {
        assert!(MIN_TIMELINE_CAPACITY <= DEFAULT_TIMELINE_CAPACITY);
        assert!(DEFAULT_TIMELINE_CAPACITY <= MAX_TIMELINE_CAPACITY);
    }

    #[test]
    fn default_locale_parses_as_language_identifier() {
        assert!(DEFAULT_LOCALE.parse::<unic_langid::LanguageIdentifier>().is_ok());
    }
}
