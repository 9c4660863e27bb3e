//! Beta-PERT three-point estimate.

use qra_core::traits::SampleDistribution;
use qra_core::types::DistributionError;
use rand::Rng;

use super::beta::Beta;
use super::require_finite;

/// PERT distribution: a Beta on `[min, max]` shaped by the most likely value.
///
/// With `range = max - min`:
/// - `alpha = 1 + 4 (mode - min) / range`
/// - `beta = 1 + 4 (max - mode) / range`
///
/// # Examples
///
/// ```
/// use qra_core::traits::SampleDistribution;
/// use qra_models::distributions::Pert;
///
/// let pert = Pert::new(10.0, 20.0, 40.0).unwrap();
/// assert!((pert.mean() - 21.666_666_666_666_668).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Pert {
    min: f64,
    mode: f64,
    max: f64,
    shape: Beta,
}

impl Pert {
    /// Creates a PERT distribution.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidParameter` unless `min < max` and
    /// `min <= mode <= max`, all finite.
    pub fn new(min: f64, mode: f64, max: f64) -> Result<Self, DistributionError> {
        let min = require_finite("low", min)?;
        let mode = require_finite("mode", mode)?;
        let max = require_finite("high", max)?;
        if min >= max {
            return Err(DistributionError::invalid(
                "high",
                format!("must exceed low ({} >= {})", min, max),
            ));
        }
        if !(min..=max).contains(&mode) {
            return Err(DistributionError::invalid(
                "mode",
                format!("must lie in [{}, {}], got {}", min, max, mode),
            ));
        }

        let range = max - min;
        let alpha = 1.0 + 4.0 * (mode - min) / range;
        let beta = 1.0 + 4.0 * (max - mode) / range;

        Ok(Self {
            min,
            mode,
            max,
            shape: Beta::new(alpha, beta)?,
        })
    }

    /// Minimum estimate.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Most likely estimate.
    pub fn mode(&self) -> f64 {
        self.mode
    }

    /// Maximum estimate.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Fitted Beta shape on the unit interval.
    pub fn shape(&self) -> &Beta {
        &self.shape
    }

    #[inline]
    fn scale(&self) -> f64 {
        self.max - self.min
    }
}

impl SampleDistribution for Pert {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + self.scale() * self.shape.sample(rng)
    }

    #[inline]
    fn quantile(&self, q: f64) -> f64 {
        self.min + self.scale() * self.shape.unit_quantile(q)
    }

    fn mean(&self) -> f64 {
        (self.min + 4.0 * self.mode + self.max) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shape_parameters() {
        let pert = Pert::new(0.0, 25.0, 100.0).unwrap();
        assert_relative_eq!(pert.shape().alpha(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(pert.shape().beta(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_matches_beta_mean() {
        let pert = Pert::new(10.0, 20.0, 40.0).unwrap();
        let beta_mean = pert.shape().mean();
        assert_relative_eq!(pert.mean(), 10.0 + 30.0 * beta_mean, epsilon = 1e-12);
    }

    #[test]
    fn test_quantiles_within_support() {
        let pert = Pert::new(5.0, 6.0, 15.0).unwrap();
        let q: Vec<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
        let values = pert.draw_ppf(&q).unwrap();
        assert_eq!(values[0], 5.0);
        assert!(values.iter().all(|&x| (5.0..=15.0).contains(&x)));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_mode_at_min_quantile_matches_closed_form() {
        // mode == min gives shape Beta(1, 5): quantile 1 - (1 - q)^(1/5).
        let pert = Pert::new(100.0, 100.0, 1100.0).unwrap();
        for q in [0.01_f64, 0.2, 0.5, 0.8, 0.99] {
            let exact = 100.0 + 1000.0 * (1.0 - (1.0 - q).powf(0.2));
            assert_relative_eq!(pert.quantile(q), exact, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_mode_at_bound_is_valid() {
        assert!(Pert::new(1.0, 1.0, 2.0).is_ok());
        assert!(Pert::new(1.0, 2.0, 2.0).is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Pert::new(2.0, 2.0, 2.0).is_err());
        assert!(Pert::new(1.0, 3.0, 2.0).is_err());
        assert!(Pert::new(1.0, 0.5, 2.0).is_err());
        assert!(Pert::new(1.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_sample_mean() {
        let pert = Pert::new(10.0, 20.0, 40.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let samples = pert.draw(50_000, &mut rng).unwrap();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert_relative_eq!(mean, pert.mean(), max_relative = 0.01);
    }
}
