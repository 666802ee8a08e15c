//! Confidence score module
//!
//! Oracles report confidence (and claim importance) on a 1-10 scale; the
//! document verifier additionally uses 0 to mean "no evidence at all".

use std::fmt;

/// A score in `[0, 10]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Confidence(u8);

impl Confidence {
    /// No evidence was consulted
    pub const ZERO: Confidence = Confidence(0);

    /// The default when an oracle omits the field
    pub const NEUTRAL: Confidence = Confidence(5);

    /// Highest possible score
    pub const MAX: Confidence = Confidence(10);

    /// Create a score, clamping into `[0, 10]`
    ///
    /// # Examples
    ///
    /// ```
    /// use sensecheck_domain::Confidence;
    ///
    /// assert_eq!(Confidence::new(42).value(), 10);
    /// assert_eq!(Confidence::new(7).value(), 7);
    /// ```
    pub fn new(value: u8) -> Self {
        Self(value.min(10))
    }

    /// Clamp an arbitrary oracle-reported number into the 1-10 rating scale
    ///
    /// Fractional values are rounded; non-finite values become [`Self::NEUTRAL`].
    pub fn rating(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        Self(value.round().clamp(1.0, 10.0) as u8)
    }

    /// Clamp an arbitrary oracle-reported number into `[0, 10]`
    pub fn score(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        Self(value.round().clamp(0.0, 10.0) as u8)
    }

    /// Get the raw value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_clamps_to_one_through_ten() {
        assert_eq!(Confidence::rating(0.0).value(), 1);
        assert_eq!(Confidence::rating(-4.0).value(), 1);
        assert_eq!(Confidence::rating(11.0).value(), 10);
        assert_eq!(Confidence::rating(7.4).value(), 7);
        assert_eq!(Confidence::rating(f64::NAN), Confidence::NEUTRAL);
    }

    #[test]
    fn test_score_allows_zero() {
        assert_eq!(Confidence::score(0.0), Confidence::ZERO);
        assert_eq!(Confidence::score(99.0), Confidence::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Confidence::new(8).to_string(), "8/10");
    }
}
