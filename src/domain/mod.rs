// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains pure value objects shared by the binder, the host
//! component tree, and the diagnostics bridge. It has no dependencies on
//! external crates (except `std`).
//!
//! # Modules
//!
//! - [`component`]: Component identity and lifecycle types ([`ComponentId`](component::ComponentId),
//!   [`InstanceId`](component::InstanceId), [`RenderMode`](component::RenderMode),
//!   [`LifecycleHook`](component::LifecycleHook))
//! - [`diagnostics`]: Diagnostics types ([`TimelineCapacity`](diagnostics::TimelineCapacity))

pub mod component;
pub mod diagnostics;
