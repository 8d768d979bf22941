//! Sampling Bounds
//!
//! Closed intervals that relationship and reputation tables are drawn from.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ArmsError, Result};

/// Valid range for any relationship score.
pub const RELATIONSHIP_DOMAIN: (f64, f64) = (-1.0, 1.0);

/// Valid range for any reputation score.
pub const REPUTATION_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Closed interval `[lower, upper]` for uniform sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleBounds {
    pub lower: f64,
    pub upper: f64,
}

impl SampleBounds {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Checks `lower <= upper` and that both ends lie inside `domain`.
    pub fn validate(&self, label: &str, domain: (f64, f64)) -> Result<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ArmsError::invalid(format!(
                "{} bounds must be finite, got [{}, {}]",
                label, self.lower, self.upper
            )));
        }
        if self.lower > self.upper {
            return Err(ArmsError::invalid(format!(
                "{} lower bound {} exceeds upper bound {}",
                label, self.lower, self.upper
            )));
        }
        if self.lower < domain.0 || self.upper > domain.1 {
            return Err(ArmsError::invalid(format!(
                "{} bounds [{}, {}] fall outside [{}, {}]",
                label, self.lower, self.upper, domain.0, domain.1
            )));
        }
        Ok(())
    }

    /// Draws one value uniformly from the interval.
    ///
    /// Callers validate first; a degenerate interval always yields `lower`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.lower..=self.upper)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_valid_bounds() {
        assert!(SampleBounds::new(-0.5, 0.2)
            .validate("relationship", RELATIONSHIP_DOMAIN)
            .is_ok());
        assert!(SampleBounds::new(0.3, 0.3)
            .validate("reputation", REPUTATION_DOMAIN)
            .is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = SampleBounds::new(0.7, 0.2)
            .validate("reputation", REPUTATION_DOMAIN)
            .unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_out_of_domain_rejected() {
        assert!(SampleBounds::new(-0.1, 0.5)
            .validate("reputation", REPUTATION_DOMAIN)
            .is_err());
        assert!(SampleBounds::new(-1.5, 0.5)
            .validate("relationship", RELATIONSHIP_DOMAIN)
            .is_err());
        assert!(SampleBounds::new(f64::NAN, 0.5)
            .validate("relationship", RELATIONSHIP_DOMAIN)
            .is_err());
    }

    #[test]
    fn test_samples_stay_inside() {
        let bounds = SampleBounds::new(0.7, 1.0);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(bounds.contains(bounds.sample(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_interval() {
        let bounds = SampleBounds::new(0.25, 0.25);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(bounds.sample(&mut rng), 0.25);
    }
}
