// SPDX-License-Identifier: MPL-2.0
//! Ring buffer backing the devtools timeline.
//!
//! Once full, recording a new entry evicts the oldest one.

use std::collections::VecDeque;

use crate::domain::diagnostics::TimelineCapacity;

/// A fixed-capacity ring of entries kept in chronological order (oldest first).
///
/// # Example
///
/// ```
/// use lens_i18n::diagnostics::CircularBuffer;
///
/// let mut buffer: CircularBuffer<&str> = CircularBuffer::with_raw_capacity(2);
/// buffer.push("translate");
/// buffer.push("translate:missing");
/// buffer.push("locale:changed");
///
/// let names: Vec<_> = buffer.iter().copied().collect();
/// assert_eq!(names, vec!["translate:missing", "locale:changed"]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: TimelineCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a buffer with an unchecked capacity (at least 1).
    ///
    /// Prefer [`CircularBuffer::new`] outside of tests.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
