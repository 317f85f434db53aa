//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Computes `round(100 * part / whole)`.
    ///
    /// Ties round half away from zero, so 1 of 8 is 13%. An empty whole
    /// counts as complete.
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::HUNDRED;
        }
        let part = part.min(whole);
        let rounded = (200 * part + whole) / (2 * whole);
        Self::new(rounded as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true if the value is exactly 100%.
    pub fn is_complete(&self) -> bool {
        self.0 == 100
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(42).value(), 42);
    }

    #[test]
    fn of_rounds_to_nearest() {
        assert_eq!(Percentage::of(12, 13).value(), 92);
        assert_eq!(Percentage::of(1, 13).value(), 8);
        assert_eq!(Percentage::of(1, 8).value(), 13);
        assert_eq!(Percentage::of(13, 13), Percentage::HUNDRED);
        assert_eq!(Percentage::of(0, 13), Percentage::ZERO);
    }

    #[test]
    fn of_with_empty_whole_is_complete() {
        assert!(Percentage::of(0, 0).is_complete());
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(Percentage::new(77).to_string(), "77%");
    }
}
