//! Tornado variations.
//!
//! Each risk is moved one at a time from its mean to its 5th and 95th
//! percentile while all other risks stay at their means. Only the moved
//! risk contributes to the change, so the variations reduce to
//! `min(p5 - mean, 0)` and `max(p95 - mean, 0)` of that risk.

use std::fmt;
use std::str::FromStr;

use qra_core::math::statistics::{mean, percentile_sorted, sorted};
use qra_core::types::RiskId;
use qra_simulation::mc::{RiskOutcome, SimulationResult};

use super::error::AnalysisError;

/// Outcome attribute a tornado diagram varies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TornadoAttribute {
    /// Drawn annual rate.
    Frequency,
    /// Single-risk impact.
    SingleRiskImpact,
    /// Annual total loss.
    #[default]
    Total,
}

impl TornadoAttribute {
    /// All attributes.
    pub fn all() -> [TornadoAttribute; 3] {
        [Self::Frequency, Self::SingleRiskImpact, Self::Total]
    }

    /// Snake-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::SingleRiskImpact => "single_risk_impact",
            Self::Total => "total",
        }
    }

    /// Values of this attribute in an outcome.
    pub fn values<'a>(&self, outcome: &'a RiskOutcome) -> &'a [f64] {
        match self {
            Self::Frequency => &outcome.frequency,
            Self::SingleRiskImpact => &outcome.single_risk_impact,
            Self::Total => &outcome.total,
        }
    }
}

impl fmt::Display for TornadoAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TornadoAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "frequency" => Ok(Self::Frequency),
            "single_risk_impact" | "impact" => Ok(Self::SingleRiskImpact),
            "total" => Ok(Self::Total),
            other => Err(format!("unknown tornado attribute '{other}'")),
        }
    }
}

/// One bar of a tornado diagram.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TornadoBar {
    /// Risk identifier.
    pub id: RiskId,
    /// Mean of the attribute.
    pub mean: f64,
    /// Downside variation, `<= 0`.
    pub negative: f64,
    /// Upside variation, `>= 0`.
    pub positive: f64,
}

impl TornadoBar {
    /// Width of the bar.
    #[inline]
    pub fn swing(&self) -> f64 {
        (self.positive - self.negative).abs()
    }
}

/// Tornado bars for `attribute`, narrowest first.
///
/// # Errors
///
/// [`AnalysisError::EmptySample`] if a risk has no values.
///
/// # Examples
///
/// ```
/// use qra_core::types::RiskId;
/// use qra_risk::analysis::{tornado_variations, TornadoAttribute};
/// use qra_simulation::mc::{RiskOutcome, SimulationMethod, SimulationResult, SimulationSummary};
///
/// let outcome = RiskOutcome {
///     id: RiskId::new("R1"),
///     frequency: vec![1.0; 3],
///     occurrences: vec![1; 3],
///     impact: vec![1.0, 2.0, 3.0],
///     single_risk_impact: vec![1.0, 2.0, 3.0],
///     total: vec![1.0, 2.0, 3.0],
/// };
/// let result = SimulationResult {
///     summary: SimulationSummary {
///         number_of_iterations: 3,
///         method: SimulationMethod::StandardMonteCarlo,
///         seed: 0,
///         risk_ids: vec![outcome.id.clone()],
///     },
///     results: vec![outcome],
/// };
/// let bars = tornado_variations(&result, TornadoAttribute::Total).unwrap();
/// assert!(bars[0].negative < 0.0 && bars[0].positive > 0.0);
/// ```
pub fn tornado_variations(
    result: &SimulationResult,
    attribute: TornadoAttribute,
) -> Result<Vec<TornadoBar>, AnalysisError> {
    let mut bars = result
        .results
        .iter()
        .map(|outcome| {
            let values = attribute.values(outcome);
            let sorted = sorted(values);
            let (p5, p95) = percentile_sorted(&sorted, 5.0)
                .zip(percentile_sorted(&sorted, 95.0))
                .ok_or(AnalysisError::EmptySample("tornado variation"))?;
            let mean = mean(values);
            Ok(TornadoBar {
                id: outcome.id.clone(),
                mean,
                negative: (p5 - mean).min(0.0),
                positive: (p95 - mean).max(0.0),
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;
    bars.sort_by(|a, b| a.swing().total_cmp(&b.swing()));
    Ok(bars)
}
