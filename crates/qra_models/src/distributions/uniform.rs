//! Uniform distribution fitted from a 90% confidence interval.

use qra_core::traits::SampleDistribution;
use qra_core::types::DistributionError;
use rand::Rng;
use rand_distr::Distribution;

use super::require_finite;

/// Uniform distribution whose 5% and 95% points are the expert's `low` and
/// `high` estimates.
///
/// The support is widened by `0.05 / 0.9` of the interval on each side and
/// the lower bound is clamped at zero, since frequencies and impacts are
/// never negative.
///
/// # Examples
///
/// ```
/// use qra_core::traits::SampleDistribution;
/// use qra_models::distributions::Uniform;
///
/// let u = Uniform::new(1.0, 10.0).unwrap();
/// assert!((u.min() - 0.5).abs() < 1e-12);
/// assert!((u.max() - 10.5).abs() < 1e-12);
/// assert!((u.quantile(0.05) - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct Uniform {
    low: f64,
    high: f64,
    min: f64,
    max: f64,
    sampler: rand_distr::Uniform<f64>,
}

impl Uniform {
    /// Fits the distribution to the interval `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidParameter` if either bound is not
    /// finite or `low >= high`.
    pub fn new(low: f64, high: f64) -> Result<Self, DistributionError> {
        let low = require_finite("low", low)?;
        let high = require_finite("high", high)?;
        if low >= high {
            return Err(DistributionError::invalid(
                "high",
                format!("must exceed low ({} >= {})", low, high),
            ));
        }

        let margin = 0.05 * (high - low) / 0.9;
        let min = (low - margin).max(0.0);
        let max = high + margin;

        Ok(Self {
            low,
            high,
            min,
            max,
            sampler: rand_distr::Uniform::new(min, max),
        })
    }

    /// Lower estimate as supplied.
    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper estimate as supplied.
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Lower bound of the fitted support.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the fitted support.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl SampleDistribution for Uniform {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }

    #[inline]
    fn quantile(&self, q: f64) -> f64 {
        self.min + q * (self.max - self.min)
    }

    fn mean(&self) -> f64 {
        0.5 * (self.min + self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fit_recovers_interval() {
        let u = Uniform::new(2.0, 20.0).unwrap();
        assert_relative_eq!(u.quantile(0.05), 2.0, epsilon = 1e-12);
        assert_relative_eq!(u.quantile(0.95), 20.0, epsilon = 1e-12);
        // One eighteenth of the interval on each side.
        assert_relative_eq!(u.min(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(u.max(), 21.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lower_bound_clamped_at_zero() {
        let u = Uniform::new(0.0, 9.0).unwrap();
        assert_eq!(u.min(), 0.0);
        assert_relative_eq!(u.max(), 9.5, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_interval() {
        assert!(Uniform::new(5.0, 5.0).is_err());
        assert!(Uniform::new(5.0, 1.0).is_err());
        assert!(Uniform::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_samples_within_support() {
        let u = Uniform::new(1.0, 3.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let samples = u.draw(10_000, &mut rng).unwrap();
        assert!(samples.iter().all(|&x| x >= u.min() && x < u.max()));
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert_relative_eq!(mean, u.mean(), epsilon = 0.02);
    }

    #[test]
    fn test_draw_zero_is_error() {
        let u = Uniform::new(1.0, 3.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            u.draw(0, &mut rng),
            Err(DistributionError::InvalidSampleSize(0))
        );
    }

    proptest! {
        #[test]
        fn prop_quantile_within_support(low in 0.0..1e4f64, width in 1e-3..1e4f64, q in 0.0..1.0f64) {
            let u = Uniform::new(low, low + width).unwrap();
            let x = u.quantile(q);
            prop_assert!(x >= u.min() && x <= u.max());
        }
    }
}
