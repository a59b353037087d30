//! Validated uniform random ranges
//!
//! A [`UniformRange`] can only be built from a well-formed `[min, max]` pair,
//! so sampling it never fails or panics. Validation happens once, when the
//! configuration is loaded, not on every frame.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Error returned when a range has `min > max` or a non-finite bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidRange {
    /// Requested lower bound
    pub min: f32,
    /// Requested upper bound
    pub max: f32,
}

impl fmt::Display for InvalidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid range: min {} is not <= max {}", self.min, self.max)
    }
}

impl std::error::Error for InvalidRange {}

/// A closed interval of `f32` values to draw uniform samples from
///
/// `min == max` is allowed and always samples `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f32; 2]", into = "[f32; 2]")]
pub struct UniformRange {
    min: f32,
    max: f32,
}

impl UniformRange {
    /// Build a range, rejecting `min > max`, non-finite bounds, and spans
    /// too wide to represent
    pub fn new(min: f32, max: f32) -> Result<Self, InvalidRange> {
        if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
            return Err(InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Build a range from two bounds in either order
    ///
    /// Intended for literal defaults; bounds read from configuration go
    /// through [`new`](Self::new) so inverted input is reported.
    pub fn ordered(a: f32, b: f32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// A degenerate range that always yields `value`
    pub fn constant(value: f32) -> Result<Self, InvalidRange> {
        Self::new(value, value)
    }

    /// Lower bound
    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound
    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Width of the range
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Whether `value` lies in `[min, max]`
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Sample from the half-open interval `[min, max)`
    ///
    /// Returns `min` for a degenerate range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }

    /// Sample from the closed interval `[min, max]`
    pub fn sample_inclusive<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl TryFrom<[f32; 2]> for UniformRange {
    type Error = InvalidRange;

    fn try_from(bounds: [f32; 2]) -> Result<Self, Self::Error> {
        Self::new(bounds[0], bounds[1])
    }
}

impl From<UniformRange> for [f32; 2] {
    fn from(range: UniformRange) -> Self {
        [range.min, range.max]
    }
}
