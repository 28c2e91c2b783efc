// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.
//!
//! This module provides type-safe wrappers for diagnostics values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Timeline Capacity Bounds
// =============================================================================

/// Timeline capacity bounds (100 to 10000 events).
pub mod timeline_capacity_bounds {
    /// Minimum timeline capacity.
    pub const MIN: usize = 100;
    /// Maximum timeline capacity.
    pub const MAX: usize = 10000;
    /// Default timeline capacity.
    pub const DEFAULT: usize = 1000;
}

// =============================================================================
// TimelineCapacity
// =============================================================================

/// Number of localization events the devtools timeline keeps.
///
/// Values outside the valid range (100–10000 events) are clamped.
///
/// # Example
///
/// ```
/// use lens_i18n::domain::diagnostics::TimelineCapacity;
///
/// assert_eq!(TimelineCapacity::new(1000).value(), 1000);
/// assert_eq!(TimelineCapacity::new(50000).value(), 10000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineCapacity(usize);

impl TimelineCapacity {
    /// Creates a new timeline capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(timeline_capacity_bounds::MIN, timeline_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for TimelineCapacity {
    fn default() -> Self {
        Self(timeline_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_capacity_clamps() {
        assert_eq!(TimelineCapacity::new(0).value(), timeline_capacity_bounds::MIN);
        assert_eq!(
            TimelineCapacity::new(100_000).value(),
            timeline_capacity_bounds::MAX
        );
    }

    #[test]
    fn timeline_capacity_default() {
        assert_eq!(
            TimelineCapacity::default().value(),
            timeline_capacity_bounds::DEFAULT
        );
    }

    #[test]
    fn timeline_capacity_accepts_valid_values() {
        assert_eq!(TimelineCapacity::new(100).value(), 100);
        assert_eq!(TimelineCapacity::new(5000).value(), 5000);
    }
}
