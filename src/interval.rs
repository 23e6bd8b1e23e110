//! Interval arithmetic for ray parameter ranges.
//!
//! Provides closed intervals [min, max] used for ray t-values and bounds checking.

use crate::vec3::Real;

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<S: Real> {
    /// Minimum value of the interval
    pub min: S,
    /// Maximum value of the interval
    pub max: S,
}

impl<S: Real> Interval<S> {
    /// Interval containing nothing (min > max).
    pub const EMPTY: Self = Self {
        min: S::INFINITY,
        max: S::NEG_INFINITY,
    };

    /// Interval containing every real number.
    pub const UNIVERSE: Self = Self {
        min: S::NEG_INFINITY,
        max: S::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub fn new(min: S, max: S) -> Self {
        Self { min, max }
    }

    /// `[min, +inf)`
    pub fn from_min(min: S) -> Self {
        Self::new(min, S::INFINITY)
    }

    /// Copy of this interval with the upper bound replaced.
    #[inline]
    pub fn with_max(self, max: S) -> Self {
        Self::new(self.min, max)
    }

    /// Calculate the size (width) of the interval
    pub fn size(&self) -> S {
        self.max - self.min
    }

    /// Check if the interval contains the given value (inclusive bounds)
    #[inline]
    pub fn contains(&self, x: S) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    #[inline]
    pub fn surrounds(&self, x: S) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the given value to be within this interval's bounds
    pub fn clamp(&self, x: S) -> S {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }
}
