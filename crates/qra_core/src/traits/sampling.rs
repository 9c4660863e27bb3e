//! Sampling capability for frequency and impact distributions.
//!
//! The simulation engine is polymorphic over this trait only. A
//! distribution implements two unchecked primitives, [`sample`] and
//! [`quantile`]; the checked batch operations [`draw`] and [`draw_ppf`]
//! are provided and enforce the preconditions in one place.
//!
//! [`sample`]: SampleDistribution::sample
//! [`quantile`]: SampleDistribution::quantile
//! [`draw`]: SampleDistribution::draw
//! [`draw_ppf`]: SampleDistribution::draw_ppf

use rand::Rng;

use crate::types::DistributionError;

/// A probability distribution the simulator can draw from.
///
/// Implementations own their fitted parameters and must not mutate any
/// state while sampling; the only stateful input is the caller's RNG.
///
/// # Examples
///
/// ```
/// use qra_core::traits::SampleDistribution;
/// use rand::Rng;
///
/// struct Constant(f64);
///
/// impl SampleDistribution for Constant {
///     fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
///         self.0
///     }
///     fn quantile(&self, _q: f64) -> f64 {
///         self.0
///     }
///     fn mean(&self) -> f64 {
///         self.0
///     }
/// }
///
/// let d = Constant(2.0);
/// assert_eq!(d.draw_ppf(&[0.1, 0.9]).unwrap(), vec![2.0, 2.0]);
/// assert!(d.draw_ppf(&[1.0]).is_err());
/// ```
pub trait SampleDistribution: Send + Sync {
    /// Draws one value directly from the distribution.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Inverse CDF at `q`. Callers guarantee `q` in `[0, 1)`.
    fn quantile(&self, q: f64) -> f64;

    /// Mean of the distribution.
    fn mean(&self) -> f64;

    /// Draws `n` independent samples.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidSampleSize`] if `n == 0`.
    fn draw<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>, DistributionError> {
        let mut out = Vec::with_capacity(n);
        self.draw_into(n, rng, &mut out)?;
        Ok(out)
    }

    /// Appends `n` independent samples to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidSampleSize`] if `n == 0`.
    fn draw_into<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
        out: &mut Vec<f64>,
    ) -> Result<(), DistributionError> {
        if n == 0 {
            return Err(DistributionError::InvalidSampleSize(n));
        }
        out.extend((0..n).map(|_| self.sample(rng)));
        Ok(())
    }

    /// Evaluates the inverse CDF at every quantile in `q`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::QuantileOutOfRange`] for the first
    /// quantile outside `[0, 1)`; nothing is evaluated in that case.
    fn draw_ppf(&self, q: &[f64]) -> Result<Vec<f64>, DistributionError> {
        let mut out = Vec::with_capacity(q.len());
        self.draw_ppf_into(q, &mut out)?;
        Ok(out)
    }

    /// Appends the inverse CDF of every quantile in `q` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::QuantileOutOfRange`] for the first
    /// quantile outside `[0, 1)`; `out` is left untouched in that case.
    fn draw_ppf_into(&self, q: &[f64], out: &mut Vec<f64>) -> Result<(), DistributionError> {
        validate_quantiles(q)?;
        out.extend(q.iter().map(|&p| self.quantile(p)));
        Ok(())
    }
}

/// Checks that every quantile lies in `[0, 1)`.
///
/// NaN and infinities are rejected.
///
/// # Errors
///
/// Returns [`DistributionError::QuantileOutOfRange`] with the index of the
/// first offending value.
pub fn validate_quantiles(q: &[f64]) -> Result<(), DistributionError> {
    match q.iter().position(|&p| !(0.0..1.0).contains(&p)) {
        Some(index) => Err(DistributionError::QuantileOutOfRange {
            index,
            value: q[index],
        }),
        None => Ok(()),
    }
}
