// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::domain::component::{ComponentId, LifecycleHook};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A lifecycle hook ran outside of an active component context.
    ///
    /// This is a host integration defect and is never recovered from.
    NoActiveComponent(LifecycleHook),
    /// The component tree holds no node with this id.
    UnknownComponent(ComponentId),
    Io(String),
    Config(String),
    Catalog(String),
}

impl Error {
    /// Returns true for the integration failure raised by lifecycle hooks.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NoActiveComponent(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoActiveComponent(hook) => {
                write!(f, "Unexpected error: no active component instance in `{}`", hook)
            }
            Error::UnknownComponent(id) => write!(f, "Unknown component: {}", id),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
