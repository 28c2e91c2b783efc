// SPDX-License-Identifier: MPL-2.0
//! `lens_i18n` binds localization instances to the lifecycle of UI components.
//!
//! Components without their own options share the root instance, the tree
//! root folds its options into it, and every other component declaring
//! options gets a local instance of its own. Bindings are released when the
//! component is destroyed, and while mounted each instance can stream its
//! events to a devtools timeline.

#![doc(html_root_url = "https://docs.rs/lens_i18n/0.1.0")]

pub mod binding;
pub mod component;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod plugin;
pub mod scene;
