// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! This module provides pure domain types for diagnostics:
//! - [`TimelineCapacity`]: Capacity for the devtools timeline buffer

mod newtypes;

pub use newtypes::{timeline_capacity_bounds, TimelineCapacity};
