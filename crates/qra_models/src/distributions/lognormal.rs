//! Lognormal distribution fitted from a 90% confidence interval.

use qra_core::traits::SampleDistribution;
use qra_core::types::DistributionError;
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::ContinuousCDF;

use super::require_finite;

/// Standard normal 95% quantile.
pub const Z_95: f64 = 1.644_853_626_951_472_2;

/// Lognormal distribution whose 5% and 95% points are `low` and `high`.
///
/// # Examples
///
/// ```
/// use qra_core::traits::SampleDistribution;
/// use qra_models::distributions::Lognormal;
///
/// let ln = Lognormal::new(1.0, 100.0).unwrap();
/// assert!((ln.median() - 10.0).abs() < 1e-9);
/// assert!((ln.quantile(0.95) - 100.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct Lognormal {
    low: f64,
    high: f64,
    mu: f64,
    sigma: f64,
    sampler: rand_distr::LogNormal<f64>,
    inverse: statrs::distribution::LogNormal,
}

impl Lognormal {
    /// Fits `mu` and `sigma` of the underlying normal to `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidParameter` unless
    /// `0 < low < high` and both are finite.
    pub fn new(low: f64, high: f64) -> Result<Self, DistributionError> {
        let low = require_finite("low", low)?;
        let high = require_finite("high", high)?;
        if low <= 0.0 {
            return Err(DistributionError::invalid("low", "must be greater than 0"));
        }
        if low >= high {
            return Err(DistributionError::invalid(
                "high",
                format!("must exceed low ({} >= {})", low, high),
            ));
        }

        let mu = 0.5 * (low.ln() + high.ln());
        let sigma = (high.ln() - low.ln()) * 0.5 / Z_95;

        let sampler = rand_distr::LogNormal::new(mu, sigma)
            .map_err(|e| DistributionError::invalid("high", e.to_string()))?;
        let inverse = statrs::distribution::LogNormal::new(mu, sigma)
            .map_err(|e| DistributionError::invalid("high", e.to_string()))?;

        Ok(Self {
            low,
            high,
            mu,
            sigma,
            sampler,
            inverse,
        })
    }

    /// Lower estimate as supplied.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper estimate as supplied.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Location of the underlying normal.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale of the underlying normal.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Median, `exp(mu)`.
    pub fn median(&self) -> f64 {
        self.mu.exp()
    }
}

impl SampleDistribution for Lognormal {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }

    #[inline]
    fn quantile(&self, q: f64) -> f64 {
        // statrs rejects p == 0 for the lognormal; the limit is the lower support bound.
        if q <= 0.0 {
            return 0.0;
        }
        self.inverse.inverse_cdf(q)
    }

    fn mean(&self) -> f64 {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }
}
