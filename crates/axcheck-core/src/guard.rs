//! Bounded counter used to cap traversal work
//!
//! A [`BoundedCounter`] belongs to one traversal on one thread. It is not
//! synchronized; create one per traversal.

use crate::error::{Error, Result};

/// Counter that accepts additions up to a fixed upper bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedCounter {
    upper_bound: usize,
    count: usize,
    attempts: usize,
}

impl BoundedCounter {
    /// Create a counter.
    ///
    /// The bound must be positive and less than `usize::MAX` so that the
    /// attempt count can always move past it.
    pub fn new(upper_bound: usize) -> Result<Self> {
        if upper_bound == 0 || upper_bound == usize::MAX {
            return Err(Error::invalid_argument(format!(
                "upper bound must be in 1..usize::MAX, got {}",
                upper_bound
            )));
        }

        Ok(Self {
            upper_bound,
            count: 0,
            attempts: 0,
        })
    }

    /// Add one; returns false once the bound has been exceeded
    pub fn try_increment(&mut self) -> bool {
        self.try_add(1)
    }

    /// Add `n`; returns false if the total would pass the bound.
    ///
    /// On failure `count` saturates at the bound and `attempts` saturates at
    /// `usize::MAX` rather than wrapping.
    pub fn try_add(&mut self, n: usize) -> bool {
        self.attempts = self.attempts.saturating_add(n);

        if self.attempts > self.upper_bound {
            self.count = self.upper_bound;
            return false;
        }

        self.count = self.attempts;
        true
    }

    /// Zero the count and attempts; the bound is unchanged
    pub fn reset(&mut self) {
        self.count = 0;
        self.attempts = 0;
    }

    /// Accepted count, never above the bound
    pub fn count(&self) -> usize {
        self.count
    }

    /// Everything ever requested since the last reset
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn upper_bound(&self) -> usize {
        self.upper_bound
    }

    /// Whether attempts have passed the bound since the last reset
    pub fn upper_bound_exceeded(&self) -> bool {
        self.attempts > self.upper_bound
    }
}
