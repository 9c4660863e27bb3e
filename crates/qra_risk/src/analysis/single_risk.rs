//! Per-risk summary statistics and exceedance.

use qra_core::math::statistics::{mean, percentile_sorted, sorted};
use qra_simulation::mc::{RiskOutcome, SimulationResult};

use super::error::AnalysisError;
use super::exceedance::ExceedanceCurve;

/// Default number of thresholds for single-risk curves.
pub const DEFAULT_SINGLE_RISK_BUCKETS: usize = 100;

/// Min, P5, mean, P95 and max of a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryStats {
    /// Smallest value.
    pub min: f64,
    /// 5th percentile.
    pub p5: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// 95th percentile.
    pub p95: f64,
    /// Largest value.
    pub max: f64,
}

impl SummaryStats {
    /// Summarises `values`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptySample`] if `values` is empty.
    pub fn from_values(values: &[f64]) -> Result<Self, AnalysisError> {
        let sorted = sorted(values);
        let empty = || AnalysisError::EmptySample("summary statistics");
        Ok(Self {
            min: *sorted.first().ok_or_else(empty)?,
            p5: percentile_sorted(&sorted, 5.0).ok_or_else(empty)?,
            mean: mean(values),
            p95: percentile_sorted(&sorted, 95.0).ok_or_else(empty)?,
            max: *sorted.last().ok_or_else(empty)?,
        })
    }
}

/// Statistics table of one risk.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleRiskStats {
    /// Risk identifier.
    pub id: qra_core::types::RiskId,
    /// Drawn annual rate.
    pub frequency: SummaryStats,
    /// Single-risk impact.
    pub single_risk_impact: SummaryStats,
}

/// Analysis of individual risks in a simulation result.
#[derive(Clone, Copy, Debug)]
pub struct SingleRiskAnalysis<'a> {
    result: &'a SimulationResult,
}

impl<'a> SingleRiskAnalysis<'a> {
    /// Wraps a result.
    pub fn new(result: &'a SimulationResult) -> Self {
        Self { result }
    }

    /// Position of the risk with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.result.results.iter().position(|r| r.id.as_str() == id)
    }

    fn outcome(&self, index: usize) -> Result<&'a RiskOutcome, AnalysisError> {
        self.result
            .results
            .get(index)
            .ok_or(AnalysisError::RiskIndexOutOfRange {
                index,
                len: self.result.results.len(),
            })
    }

    /// Frequency and single-risk impact table of the `index`-th risk.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::RiskIndexOutOfRange`] for a bad index
    /// - [`AnalysisError::EmptySample`] if the run has no years
    pub fn stats(&self, index: usize) -> Result<SingleRiskStats, AnalysisError> {
        let outcome = self.outcome(index)?;
        Ok(SingleRiskStats {
            id: outcome.id.clone(),
            frequency: SummaryStats::from_values(&outcome.frequency)?,
            single_risk_impact: SummaryStats::from_values(&outcome.single_risk_impact)?,
        })
    }

    /// Exceedance curve of the `index`-th risk's annual total.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RiskIndexOutOfRange`] for a bad index, otherwise
    /// see [`ExceedanceCurve::from_losses`].
    pub fn exceedance(&self, index: usize, n_buckets: usize) -> Result<ExceedanceCurve, AnalysisError> {
        ExceedanceCurve::from_losses(&self.outcome(index)?.total, n_buckets)
    }
}
