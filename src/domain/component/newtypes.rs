// SPDX-License-Identifier: MPL-2.0
//! Component newtypes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// ComponentId
// =============================================================================

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a component node, unique among live nodes of every tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Allocates the next process-unique component id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw identity value handed out by the host.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

// =============================================================================
// InstanceId
// =============================================================================

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a localization instance, used to label diagnostics events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocates the next process-unique instance id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i18n#{}", self.0)
    }
}

// =============================================================================
// RenderMode
// =============================================================================

/// Execution context the host renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Interactive rendering with a live UI tree.
    #[default]
    Interactive,
    /// Non-interactive (server-side) rendering. Nodes never mount a live element.
    Server,
}

impl RenderMode {
    /// Maps the `server_side` settings flag to a render mode.
    #[must_use]
    pub fn from_server_flag(server_side: bool) -> Self {
        if server_side {
            Self::Server
        } else {
            Self::Interactive
        }
    }

    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

// =============================================================================
// LifecycleHook
// =============================================================================

/// Lifecycle phases of a component node, in invocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    BeforeCreate,
    Mounted,
    BeforeUnmount,
}

impl LifecycleHook {
    /// Name of the callback slot in the host framework.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeCreate => "beforeCreate",
            Self::Mounted => "mounted",
            Self::BeforeUnmount => "beforeUnmount",
        }
    }
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================
