use std::ops::RangeInclusive;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// The discretized domain of a linguistic variable.
///
/// Samples run from `min` to `max` inclusive, `step` apart, so `0..=10` with a
/// step of 1 has eleven points.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    samples: Vec<f64>,
    min: f64,
    max: f64,
}

impl Universe {
    pub(crate) fn new(variable: &str, range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let min = *range.start();
        let max = *range.end();
        let invalid = |reason: String| FuzzyError::InvalidUniverse {
            variable: variable.to_owned(),
            reason,
        };

        if !min.is_finite() || !max.is_finite() {
            return Err(invalid(format!("bounds {min}..={max} must be finite")));
        }
        if min >= max {
            return Err(invalid(format!("min {min} must be below max {max}")));
        }
        if !(step > 0.) || step > max - min {
            return Err(invalid(format!("step {step} must lie in (0, {}]", max - min)));
        }

        let samples: Vec<f64> = Linspace::stepped(min, max, step).collect();
        let last = samples.last().copied().unwrap_or(min);

        Ok(Self { samples, min, max: last })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// The last sample, which is the declared max unless the step does not divide the range.
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_step() {
        let universe = Universe::new("time", 0. ..=10., 1.).unwrap();

        assert_eq!(universe.len(), 11);
        assert_eq!(universe.samples()[0], 0.);
        assert_eq!(universe.samples()[10], 10.);
        assert!(universe.samples().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn fractional_step() {
        let universe = Universe::new("ratio", 0. ..=1., 0.1).unwrap();

        assert_eq!(universe.len(), 11);
        assert_eq!(universe.max(), 1.);
    }

    #[test]
    fn inexact_step_reaches_declared_max() {
        let universe = Universe::new("x", 0. ..=0.9, 0.3).unwrap();

        assert_eq!(universe.len(), 4);
        assert_eq!(universe.samples()[3], 0.9);
        assert_eq!(universe.max(), 0.9);
        assert!(universe.contains(0.9));
    }

    #[test]
    fn step_not_dividing_range() {
        let universe = Universe::new("size", 0. ..=10., 3.).unwrap();

        assert_eq!(universe.samples(), &[0., 3., 6., 9.]);
        assert_eq!(universe.max(), 9.);
        assert!(!universe.contains(9.5));
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(matches!(
            Universe::new("x", 5. ..=5., 1.),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
        assert!(matches!(
            Universe::new("x", 0. ..=f64::INFINITY, 1.),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
        assert!(matches!(
            Universe::new("x", 0. ..=1., 0.),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
        assert!(matches!(
            Universe::new("x", 0. ..=1., 2.),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
        assert!(matches!(
            Universe::new("x", 0. ..=1., f64::NAN),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
    }
}
