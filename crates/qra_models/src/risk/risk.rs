//! A single risk scenario.

use qra_core::traits::SampleDistribution;
use qra_core::types::{DistributionError, RiskId};
use rand::Rng;

use crate::distributions::{DistributionKind, DistributionModel};

/// A named risk with an annual occurrence-rate distribution and a
/// per-occurrence impact distribution.
///
/// Immutable after construction.
///
/// # Examples
///
/// ```
/// use qra_models::distributions::DistributionModel;
/// use qra_models::risk::Risk;
///
/// let risk = Risk::new(
///     "R001",
///     "Data breach",
///     DistributionModel::beta(1.0, 9.0).unwrap(),
///     DistributionModel::pert(1e3, 5e3, 2e4).unwrap(),
/// );
/// assert_eq!(risk.id().as_str(), "R001");
/// let q = risk.get_impact_ppf(&[0.5]).unwrap();
/// assert!(q[0] > 1e3 && q[0] < 2e4);
/// ```
#[derive(Clone, Debug)]
pub struct Risk<D = DistributionModel> {
    id: RiskId,
    name: String,
    frequency: D,
    impact: D,
}

impl<D: SampleDistribution> Risk<D> {
    /// Creates a risk.
    pub fn new(id: impl Into<RiskId>, name: impl Into<String>, frequency: D, impact: D) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            frequency,
            impact,
        }
    }

    /// Risk identifier.
    #[inline]
    pub fn id(&self) -> &RiskId {
        &self.id
    }

    /// Human-readable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Annual occurrence-rate distribution.
    #[inline]
    pub fn frequency(&self) -> &D {
        &self.frequency
    }

    /// Per-occurrence impact distribution.
    #[inline]
    pub fn impact(&self) -> &D {
        &self.impact
    }

    /// Draws `n` occurrence rates.
    pub fn get_frequency<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>, DistributionError> {
        self.frequency.draw(n, rng)
    }

    /// Draws `n` impacts.
    pub fn get_impact<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>, DistributionError> {
        self.impact.draw(n, rng)
    }

    /// Occurrence-rate quantiles.
    pub fn get_frequency_ppf(&self, q: &[f64]) -> Result<Vec<f64>, DistributionError> {
        self.frequency.draw_ppf(q)
    }

    /// Impact quantiles.
    pub fn get_impact_ppf(&self, q: &[f64]) -> Result<Vec<f64>, DistributionError> {
        self.impact.draw_ppf(q)
    }
}

impl Risk<DistributionModel> {
    /// Tag of the frequency distribution.
    pub fn frequency_kind(&self) -> DistributionKind {
        self.frequency.kind()
    }

    /// Tag of the impact distribution.
    pub fn impact_kind(&self) -> DistributionKind {
        self.impact.kind()
    }
}
