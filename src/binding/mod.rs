// SPDX-License-Identifier: MPL-2.0
//! Binding of localization instances to the component lifecycle.
//!
//! - [`I18nMixin`]: lifecycle callbacks choosing and releasing instances
//! - [`merge_to_root`]: folds a root component's options into the root instance
//! - [`InstanceRegistry`]: component → instance lookup
//! - [`I18nApi`]: translation surface exposed on bound components

mod api;
mod merge;
mod mixin;
mod registry;

pub use api::I18nApi;
pub use merge::merge_to_root;
pub use mixin::I18nMixin;
pub use registry::InstanceRegistry;
