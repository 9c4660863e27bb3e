//! Static dispatch enum for risk distributions.
//!
//! `DistributionModel` wraps the four concrete distributions so that risks
//! and portfolios stay monomorphic without trait objects. Models are built
//! either through the typed constructors or from a tag and a parameter map
//! through the registry.
//!
//! ## Example
//!
//! ```
//! use qra_models::distributions::{DistributionKind, DistributionModel};
//!
//! let kind: DistributionKind = "lognormal".parse().unwrap();
//! assert_eq!(kind, DistributionKind::Lognormal);
//! assert_eq!(kind.parameter_names(), &["low", "high"]);
//!
//! let model = DistributionModel::beta(2.0, 5.0).unwrap();
//! assert_eq!(model.kind().name(), "Beta");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use qra_core::traits::SampleDistribution;
use qra_core::types::DistributionError;
use rand::Rng;

use super::{Beta, Lognormal, Pert, Uniform};

/// Named distribution parameters, e.g. `{"low": 1.0, "high": 3.0}`.
pub type ParameterSet = BTreeMap<String, f64>;

/// Distribution tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistributionKind {
    /// Beta on `[0, 1]`.
    Beta,
    /// Uniform from a 90% interval.
    Uniform,
    /// Lognormal from a 90% interval.
    Lognormal,
    /// Beta-PERT three-point estimate.
    #[cfg_attr(feature = "serde", serde(rename = "PERT"))]
    Pert,
}

impl DistributionKind {
    /// Canonical tag.
    pub fn name(&self) -> &'static str {
        match self {
            DistributionKind::Beta => "Beta",
            DistributionKind::Uniform => "Uniform",
            DistributionKind::Lognormal => "Lognormal",
            DistributionKind::Pert => "PERT",
        }
    }

    /// All supported kinds, in registry order.
    pub fn all() -> [DistributionKind; 4] {
        [
            DistributionKind::Beta,
            DistributionKind::Uniform,
            DistributionKind::Lognormal,
            DistributionKind::Pert,
        ]
    }

    /// Parameter names expected by [`DistributionModel::from_parameters`].
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            DistributionKind::Beta => &["alpha", "beta"],
            DistributionKind::Uniform | DistributionKind::Lognormal => &["low", "high"],
            DistributionKind::Pert => &["low", "mode", "high"],
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DistributionError::UnknownKind(s.to_string()))
    }
}

type Constructor = fn(&ParameterSet) -> Result<DistributionModel, DistributionError>;

const REGISTRY: [(DistributionKind, Constructor); 4] = [
    (DistributionKind::Beta, build_beta),
    (DistributionKind::Uniform, build_uniform),
    (DistributionKind::Lognormal, build_lognormal),
    (DistributionKind::Pert, build_pert),
];

fn param(
    kind: DistributionKind,
    params: &ParameterSet,
    name: &'static str,
    aliases: &[&str],
) -> Result<f64, DistributionError> {
    std::iter::once(name)
        .chain(aliases.iter().copied())
        .find_map(|key| params.get(key).copied())
        .ok_or_else(|| DistributionError::MissingParameter {
            kind: kind.name().to_string(),
            name,
        })
}

fn build_beta(params: &ParameterSet) -> Result<DistributionModel, DistributionError> {
    let kind = DistributionKind::Beta;
    DistributionModel::beta(
        param(kind, params, "alpha", &[])?,
        param(kind, params, "beta", &[])?,
    )
}

fn build_uniform(params: &ParameterSet) -> Result<DistributionModel, DistributionError> {
    let kind = DistributionKind::Uniform;
    DistributionModel::uniform(
        param(kind, params, "low", &[])?,
        param(kind, params, "high", &[])?,
    )
}

fn build_lognormal(params: &ParameterSet) -> Result<DistributionModel, DistributionError> {
    let kind = DistributionKind::Lognormal;
    DistributionModel::lognormal(
        param(kind, params, "low", &[])?,
        param(kind, params, "high", &[])?,
    )
}

fn build_pert(params: &ParameterSet) -> Result<DistributionModel, DistributionError> {
    let kind = DistributionKind::Pert;
    DistributionModel::pert(
        param(kind, params, "low", &[])?,
        param(kind, params, "mode", &["mean"])?,
        param(kind, params, "high", &[])?,
    )
}

/// Static dispatch enum over the supported distributions.
///
/// # Example
///
/// ```
/// use qra_core::traits::SampleDistribution;
/// use qra_models::distributions::DistributionModel;
///
/// let model = DistributionModel::uniform(1.0, 3.0).unwrap();
/// let values = model.draw_ppf(&[0.05, 0.95]).unwrap();
/// assert!((values[0] - 1.0).abs() < 1e-12);
/// assert!((values[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub enum DistributionModel {
    /// Beta distribution.
    Beta(Beta),
    /// Uniform distribution.
    Uniform(Uniform),
    /// Lognormal distribution.
    Lognormal(Lognormal),
    /// PERT distribution.
    Pert(Pert),
}

impl DistributionModel {
    /// Beta with shapes `alpha`, `beta`.
    pub fn beta(alpha: f64, beta: f64) -> Result<Self, DistributionError> {
        Beta::new(alpha, beta).map(Self::Beta)
    }

    /// Uniform fitted to the 90% interval `[low, high]`.
    pub fn uniform(low: f64, high: f64) -> Result<Self, DistributionError> {
        Uniform::new(low, high).map(Self::Uniform)
    }

    /// Lognormal fitted to the 90% interval `[low, high]`.
    pub fn lognormal(low: f64, high: f64) -> Result<Self, DistributionError> {
        Lognormal::new(low, high).map(Self::Lognormal)
    }

    /// PERT on `[low, high]` with most likely value `mode`.
    pub fn pert(low: f64, mode: f64, high: f64) -> Result<Self, DistributionError> {
        Pert::new(low, mode, high).map(Self::Pert)
    }

    /// Builds a model of `kind` from named parameters.
    ///
    /// # Errors
    ///
    /// `MissingParameter` if a required name is absent, otherwise whatever
    /// the concrete constructor reports.
    pub fn from_parameters(
        kind: DistributionKind,
        params: &ParameterSet,
    ) -> Result<Self, DistributionError> {
        let (_, build) = REGISTRY
            .iter()
            .find(|(k, _)| *k == kind)
            .ok_or_else(|| DistributionError::UnknownKind(kind.name().to_string()))?;
        build(params)
    }

    /// Builds a model from a textual tag such as `"PERT"`.
    pub fn from_tag(tag: &str, params: &ParameterSet) -> Result<Self, DistributionError> {
        Self::from_parameters(tag.parse()?, params)
    }

    /// The tag of the wrapped distribution.
    pub fn kind(&self) -> DistributionKind {
        match self {
            DistributionModel::Beta(_) => DistributionKind::Beta,
            DistributionModel::Uniform(_) => DistributionKind::Uniform,
            DistributionModel::Lognormal(_) => DistributionKind::Lognormal,
            DistributionModel::Pert(_) => DistributionKind::Pert,
        }
    }
}

impl SampleDistribution for DistributionModel {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            DistributionModel::Beta(d) => d.sample(rng),
            DistributionModel::Uniform(d) => d.sample(rng),
            DistributionModel::Lognormal(d) => d.sample(rng),
            DistributionModel::Pert(d) => d.sample(rng),
        }
    }

    #[inline]
    fn quantile(&self, q: f64) -> f64 {
        match self {
            DistributionModel::Beta(d) => d.quantile(q),
            DistributionModel::Uniform(d) => d.quantile(q),
            DistributionModel::Lognormal(d) => d.quantile(q),
            DistributionModel::Pert(d) => d.quantile(q),
        }
    }

    fn mean(&self) -> f64 {
        match self {
            DistributionModel::Beta(d) => d.mean(),
            DistributionModel::Uniform(d) => d.mean(),
            DistributionModel::Lognormal(d) => d.mean(),
            DistributionModel::Pert(d) => d.mean(),
        }
    }
}
