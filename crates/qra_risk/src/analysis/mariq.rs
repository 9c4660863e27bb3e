//! MaRiQ portfolio analysis.
//!
//! Compares the simulated total annual loss of a portfolio against a
//! risk tolerance curve and ranks risks by expected loss.
//!
//! Per risk:
//! - mean frequency: mean of the drawn annual rates
//! - mean impact: mean over every simulated occurrence
//! - expected loss: mean of `frequency * single_risk_impact`

use rayon::prelude::*;

use qra_core::math::statistics::{exceedance_probability, mean};
use qra_core::types::RiskId;
use qra_simulation::mc::{RiskOutcome, SimulationResult};

use super::error::AnalysisError;
use super::exceedance::ExceedanceCurve;

/// Tolerated exceedance probability at given loss levels.
///
/// Probabilities are percentages in `[0, 100]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskTolerance {
    losses: Vec<f64>,
    probabilities_pct: Vec<f64>,
}

impl RiskTolerance {
    /// Creates a tolerance curve.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::ToleranceMismatch`] if the lengths differ
    /// - [`AnalysisError::InvalidTolerance`] for negative or non-finite
    ///   losses, or probabilities outside `[0, 100]`
    pub fn new(losses: Vec<f64>, probabilities_pct: Vec<f64>) -> Result<Self, AnalysisError> {
        if losses.len() != probabilities_pct.len() {
            return Err(AnalysisError::ToleranceMismatch {
                losses: losses.len(),
                probabilities: probabilities_pct.len(),
            });
        }
        if let Some(&l) = losses.iter().find(|l| !l.is_finite() || **l < 0.0) {
            return Err(AnalysisError::InvalidTolerance(format!(
                "loss {l} must be finite and non-negative"
            )));
        }
        if let Some(&p) = probabilities_pct
            .iter()
            .find(|p| !(0.0..=100.0).contains(*p))
        {
            return Err(AnalysisError::InvalidTolerance(format!(
                "probability {p}% must lie in [0, 100]"
            )));
        }
        Ok(Self {
            losses,
            probabilities_pct,
        })
    }

    /// Loss levels.
    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    /// Tolerated probabilities in percent.
    pub fn probabilities_pct(&self) -> &[f64] {
        &self.probabilities_pct
    }

    /// Tolerated probabilities as fractions.
    pub fn probabilities(&self) -> Vec<f64> {
        self.probabilities_pct.iter().map(|p| p / 100.0).collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.losses.len()
    }

    /// True when the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }
}

/// Mean statistics of one risk.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// Risk identifier.
    pub id: RiskId,
    /// Mean annual rate.
    pub mean_frequency: f64,
    /// Mean impact per occurrence; `0.0` when nothing occurred.
    pub mean_impact: f64,
    /// Mean of `frequency * single_risk_impact`.
    pub mean_expected_loss: f64,
}

impl RiskMetrics {
    /// Computes the metrics of one outcome.
    pub fn from_outcome(outcome: &RiskOutcome) -> Self {
        let expected_loss: Vec<f64> = outcome
            .frequency
            .iter()
            .zip(&outcome.single_risk_impact)
            .map(|(f, i)| f * i)
            .collect();
        Self {
            id: outcome.id.clone(),
            mean_frequency: mean(&outcome.frequency),
            mean_impact: mean(&outcome.impact),
            mean_expected_loss: mean(&expected_loss),
        }
    }
}

/// Total risk curve with the tolerance overlay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TotalRiskProfile {
    /// Exceedance curve of the portfolio total.
    pub curve: ExceedanceCurve,
    /// Tolerance loss levels; empty without a tolerance.
    pub tolerance_losses: Vec<f64>,
    /// Tolerated probabilities as fractions.
    pub tolerance_probabilities: Vec<f64>,
}

/// A ranked risk with its single-risk impact sample.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRisk<'a> {
    /// One-based rank.
    pub rank: usize,
    /// Mean statistics.
    pub metrics: &'a RiskMetrics,
    /// Single-risk impact draws, for uncertainty plots.
    pub single_risk_impact: &'a [f64],
}

/// A tolerance point and the simulated probability at its loss.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToleranceBreach {
    /// Loss level.
    pub loss: f64,
    /// Tolerated exceedance probability (fraction).
    pub tolerated: f64,
    /// Simulated exceedance probability (fraction).
    pub simulated: f64,
}

impl ToleranceBreach {
    /// True when the simulated probability exceeds the tolerated one.
    #[inline]
    pub fn is_breached(&self) -> bool {
        self.simulated > self.tolerated
    }
}

/// MaRiQ analysis of a simulation result.
#[derive(Clone, Debug)]
pub struct MariqAnalysis<'a> {
    result: &'a SimulationResult,
    tolerance: Option<RiskTolerance>,
    total_risk: Vec<f64>,
    metrics: Vec<RiskMetrics>,
}

impl<'a> MariqAnalysis<'a> {
    /// Aggregates the portfolio total and per-risk metrics.
    pub fn new(result: &'a SimulationResult) -> Self {
        let metrics = result
            .results
            .par_iter()
            .map(RiskMetrics::from_outcome)
            .collect();
        Self {
            result,
            tolerance: None,
            total_risk: result.portfolio_total(),
            metrics,
        }
    }

    /// Attaches a tolerance curve.
    pub fn with_tolerance(mut self, tolerance: RiskTolerance) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Attached tolerance curve.
    pub fn tolerance(&self) -> Option<&RiskTolerance> {
        self.tolerance.as_ref()
    }

    /// Summed loss of all risks per year.
    pub fn total_risk(&self) -> &[f64] {
        &self.total_risk
    }

    /// Per-risk metrics in portfolio order.
    pub fn metrics(&self) -> &[RiskMetrics] {
        &self.metrics
    }

    /// Mean annual portfolio loss.
    pub fn expected_total_loss(&self) -> f64 {
        mean(&self.total_risk)
    }

    /// Exceedance curve of the portfolio total with the tolerance overlay.
    ///
    /// # Errors
    ///
    /// See [`ExceedanceCurve::from_losses`].
    pub fn total_risk_profile(&self, n_buckets: usize) -> Result<TotalRiskProfile, AnalysisError> {
        let curve = ExceedanceCurve::from_losses(&self.total_risk, n_buckets)?;
        let (tolerance_losses, tolerance_probabilities) = match &self.tolerance {
            Some(t) => (t.losses.clone(), t.probabilities()),
            None => (Vec::new(), Vec::new()),
        };
        Ok(TotalRiskProfile {
            curve,
            tolerance_losses,
            tolerance_probabilities,
        })
    }

    /// Top `top_n` risks by expected loss, highest first.
    ///
    /// Ties keep portfolio order.
    pub fn risk_ranking(&self, top_n: usize) -> Vec<RankedRisk<'_>> {
        let mut order: Vec<usize> = (0..self.metrics.len()).collect();
        order.sort_by(|&a, &b| {
            self.metrics[b]
                .mean_expected_loss
                .total_cmp(&self.metrics[a].mean_expected_loss)
        });
        order
            .into_iter()
            .take(top_n)
            .enumerate()
            .map(|(rank, i)| RankedRisk {
                rank: rank + 1,
                metrics: &self.metrics[i],
                single_risk_impact: &self.result.results[i].single_risk_impact,
            })
            .collect()
    }

    /// Tolerance points whose simulated exceedance exceeds the tolerated one.
    pub fn tolerance_breaches(&self) -> Vec<ToleranceBreach> {
        self.tolerance_comparison()
            .into_iter()
            .filter(ToleranceBreach::is_breached)
            .collect()
    }

    /// Simulated exceedance at every tolerance point.
    ///
    /// Empty without a tolerance.
    pub fn tolerance_comparison(&self) -> Vec<ToleranceBreach> {
        let Some(tolerance) = &self.tolerance else {
            return Vec::new();
        };
        tolerance
            .losses
            .iter()
            .zip(&tolerance.probabilities_pct)
            .map(|(&loss, &pct)| ToleranceBreach {
                loss,
                tolerated: pct / 100.0,
                simulated: exceedance_probability(&self.total_risk, loss),
            })
            .collect()
    }
}
