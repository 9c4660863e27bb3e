//! Occurrence models: from an annual rate to a count of events.

use rand::Rng;
use rand_distr::{Distribution, Poisson};

use super::error::SamplingError;

/// Maps an occurrence rate to a non-negative event count.
///
/// The simulator rejects negative and non-finite rates before calling
/// [`count`](OccurrenceModel::count).
pub trait OccurrenceModel: Send + Sync {
    /// Number of occurrences in one year with the given rate.
    fn count<R: Rng + ?Sized>(&self, rate: f64, rng: &mut R) -> Result<u64, SamplingError>;
}

/// Poisson-distributed counts with mean equal to the rate.
///
/// # Examples
///
/// ```
/// use qra_simulation::mc::{OccurrenceModel, PoissonOccurrences};
/// use qra_simulation::rng::SimulationRng;
///
/// let mut rng = SimulationRng::from_seed(1);
/// assert_eq!(PoissonOccurrences.count(0.0, &mut rng).unwrap(), 0);
/// assert!(PoissonOccurrences.count(-1.0, &mut rng).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PoissonOccurrences;

impl OccurrenceModel for PoissonOccurrences {
    #[inline]
    fn count<R: Rng + ?Sized>(&self, rate: f64, rng: &mut R) -> Result<u64, SamplingError> {
        if rate == 0.0 {
            return Ok(0);
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(SamplingError::InvalidRate { rate });
        }
        let poisson = Poisson::new(rate).map_err(|_| SamplingError::InvalidRate { rate })?;
        let k: f64 = poisson.sample(rng);
        Ok(k as u64)
    }
}
