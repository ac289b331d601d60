//! Progress value object (fraction between 0 and 1).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Completion fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Nothing done.
    pub const ZERO: Self = Self(0.0);

    /// Everything done.
    pub const COMPLETE: Self = Self(1.0);

    /// Creates a Progress, clamping to the valid range. NaN becomes zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Progress, returning error if out of range or not a number.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("progress", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Ratio of `done` to `total`; zero when `total` is zero.
    pub fn ratio(done: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        Self::clamped(done as f64 / total as f64)
    }

    /// Returns the value as a fraction.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value rounded to a whole percentage.
    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for Progress {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}
