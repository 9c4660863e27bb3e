//! Beta distribution on `[0, 1]`.
//!
//! `alpha` counts "hits" and `beta` counts "misses"; the distribution is
//! mostly used to express an annual probability of occurrence.

use qra_core::traits::SampleDistribution;
use qra_core::types::DistributionError;
use rand::Rng;
use rand_distr::Distribution;
use statrs::function::beta::{beta_reg, inv_beta_reg, ln_beta};

use super::require_finite;

/// Newton refinements applied after the AS 64 inversion.
const NEWTON_STEPS: usize = 2;

/// Beta distribution with shape parameters `alpha` and `beta`.
///
/// # Examples
///
/// ```
/// use qra_core::traits::SampleDistribution;
/// use qra_models::distributions::Beta;
///
/// let beta = Beta::new(2.0, 8.0).unwrap();
/// assert!((beta.mean() - 0.2).abs() < 1e-12);
/// assert!(Beta::new(0.0, 1.0).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Beta {
    alpha: f64,
    beta: f64,
    ln_beta: f64,
    sampler: rand_distr::Beta<f64>,
}

impl Beta {
    /// Creates a Beta distribution.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidParameter` unless both shapes are
    /// finite and strictly positive.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, DistributionError> {
        let alpha = require_finite("alpha", alpha)?;
        let beta = require_finite("beta", beta)?;
        if alpha <= 0.0 {
            return Err(DistributionError::invalid("alpha", "must be greater than 0"));
        }
        if beta <= 0.0 {
            return Err(DistributionError::invalid("beta", "must be greater than 0"));
        }

        let sampler = rand_distr::Beta::new(alpha, beta)
            .map_err(|e| DistributionError::invalid("alpha", e.to_string()))?;

        Ok(Self {
            alpha,
            beta,
            ln_beta: ln_beta(alpha, beta),
            sampler,
        })
    }

    /// Returns the `alpha` shape parameter.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the `beta` shape parameter.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Standard Beta quantile, shared with the PERT distribution.
    ///
    /// Inverts the regularised incomplete beta function (AS 64), then
    /// polishes the root with Newton steps on the exact CDF. `q <= 0` maps
    /// to 0 and `q >= 1` to 1.
    pub(crate) fn unit_quantile(&self, q: f64) -> f64 {
        if !(q > 0.0) {
            return 0.0;
        }
        if q >= 1.0 {
            return 1.0;
        }
        let mut x = inv_beta_reg(self.alpha, self.beta, q);
        for _ in 0..NEWTON_STEPS {
            if !(x > 0.0 && x < 1.0) {
                break;
            }
            let density = self.density(x);
            if !(density > 0.0 && density.is_finite()) {
                break;
            }
            let next = x - (beta_reg(self.alpha, self.beta, x) - q) / density;
            if !(next > 0.0 && next < 1.0) {
                break;
            }
            x = next;
        }
        x
    }

    /// Density at `x` in `(0, 1)`, evaluated in log space.
    fn density(&self, x: f64) -> f64 {
        ((self.alpha - 1.0) * x.ln() + (self.beta - 1.0) * (-x).ln_1p() - self.ln_beta).exp()
    }
}

impl SampleDistribution for Beta {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }

    #[inline]
    fn quantile(&self, q: f64) -> f64 {
        self.unit_quantile(q)
    }

    fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}
