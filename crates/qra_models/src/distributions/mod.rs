//! Frequency and impact distributions.
//!
//! This module provides the four distributions used to encode expert
//! estimates:
//! - `Beta`: shape-parameterised on `[0, 1]`, typically a probability
//! - `Uniform`: fitted so that `low`/`high` are the 5% and 95% points
//! - `Lognormal`: fitted so that `low`/`high` are the 5% and 95% points
//! - `Pert`: Beta-PERT three-point estimate (min, most likely, max)
//!
//! `DistributionModel` wraps them for static dispatch and is built from a
//! tag through an explicit registry.
//!
//! ## Example
//!
//! ```
//! use qra_core::traits::SampleDistribution;
//! use qra_models::distributions::{DistributionKind, DistributionModel, ParameterSet};
//!
//! let mut params = ParameterSet::new();
//! params.insert("low".to_string(), 1.0);
//! params.insert("mode".to_string(), 2.0);
//! params.insert("high".to_string(), 6.0);
//!
//! let pert = DistributionModel::from_tag("PERT", &params).unwrap();
//! assert_eq!(pert.kind(), DistributionKind::Pert);
//! assert!((pert.mean() - 2.5).abs() < 1e-12);
//! ```

pub mod beta;
pub mod lognormal;
pub mod model_enum;
pub mod pert;
pub mod uniform;

pub use beta::Beta;
pub use lognormal::Lognormal;
pub use model_enum::{DistributionKind, DistributionModel, ParameterSet};
pub use pert::Pert;
pub use uniform::Uniform;

use qra_core::types::DistributionError;

/// Rejects NaN and infinite parameters.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistributionError::invalid(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}
