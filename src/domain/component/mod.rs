// SPDX-License-Identifier: MPL-2.0
//! Component domain types.
//!
//! This module provides pure identity and phase types shared by the host
//! component tree and the localization binder:
//! - [`ComponentId`]: Identity of a live component node
//! - [`InstanceId`]: Identity of a localization instance
//! - [`RenderMode`]: Interactive or server-side execution
//! - [`LifecycleHook`]: The three lifecycle phases the binder hooks

mod newtypes;

pub use newtypes::{ComponentId, InstanceId, LifecycleHook, RenderMode};
