//! Loss exceedance curves.
//!
//! Thresholds span `[0, P99]` of the sample in equal steps; each
//! probability is the fraction of samples at or above its threshold.

use qra_core::math::statistics::{linspace, percentile_sorted, sorted};

use super::error::AnalysisError;

/// Default number of thresholds for portfolio curves.
pub const DEFAULT_BUCKETS: usize = 200;

/// Non-increasing curve of `P(loss >= threshold)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExceedanceCurve {
    /// Loss thresholds, ascending.
    pub thresholds: Vec<f64>,
    /// Exceedance probability per threshold.
    pub probabilities: Vec<f64>,
}

impl ExceedanceCurve {
    /// Builds the curve of `losses` over `n_buckets` thresholds.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidBucketCount`] if `n_buckets < 2`
    /// - [`AnalysisError::EmptySample`] if `losses` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use qra_risk::analysis::ExceedanceCurve;
    ///
    /// let losses: Vec<f64> = (0..=100).map(f64::from).collect();
    /// let curve = ExceedanceCurve::from_losses(&losses, 2).unwrap();
    /// assert_eq!(curve.thresholds[0], 0.0);
    /// assert!((curve.thresholds[1] - 99.0).abs() < 1e-9);
    /// assert_eq!(curve.probabilities[0], 1.0);
    /// ```
    pub fn from_losses(losses: &[f64], n_buckets: usize) -> Result<Self, AnalysisError> {
        if n_buckets < 2 {
            return Err(AnalysisError::InvalidBucketCount(n_buckets));
        }
        let sorted = sorted(losses);
        let p99 = percentile_sorted(&sorted, 99.0)
            .ok_or(AnalysisError::EmptySample("exceedance curve"))?;
        let thresholds = linspace(0.0, p99, n_buckets);
        let n = sorted.len() as f64;
        let probabilities = thresholds
            .iter()
            .map(|&t| {
                let below = sorted.partition_point(|&x| x < t);
                (sorted.len() - below) as f64 / n
            })
            .collect();
        Ok(Self {
            thresholds,
            probabilities,
        })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// True when the curve has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Iterates `(threshold, probability)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.thresholds
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }
}
