//! Simulation method selector.

use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Sampling method of a simulation run.
///
/// # Examples
///
/// ```
/// use qra_simulation::mc::SimulationMethod;
///
/// let method: SimulationMethod = "rqmc".parse().unwrap();
/// assert_eq!(method, SimulationMethod::RandomizedQuasiMonteCarlo);
/// assert_eq!(method.short_name(), "rqmc");
/// assert!("lhs".parse::<SimulationMethod>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SimulationMethod {
    /// Direct pseudo-random draws.
    #[default]
    StandardMonteCarlo,
    /// Unscrambled Sobol points, shuffled per block.
    QuasiMonteCarlo,
    /// Scrambled Sobol points.
    RandomizedQuasiMonteCarlo,
}

impl SimulationMethod {
    /// All methods.
    pub fn all() -> [SimulationMethod; 3] {
        [
            SimulationMethod::StandardMonteCarlo,
            SimulationMethod::QuasiMonteCarlo,
            SimulationMethod::RandomizedQuasiMonteCarlo,
        ]
    }

    /// Abbreviation accepted on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            SimulationMethod::StandardMonteCarlo => "smc",
            SimulationMethod::QuasiMonteCarlo => "qmc",
            SimulationMethod::RandomizedQuasiMonteCarlo => "rqmc",
        }
    }

    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            SimulationMethod::StandardMonteCarlo => "Standard Monte Carlo",
            SimulationMethod::QuasiMonteCarlo => "Quasi-Monte Carlo",
            SimulationMethod::RandomizedQuasiMonteCarlo => "Randomized Quasi-Monte Carlo",
        }
    }

    /// Whether the method draws from a Sobol sequence.
    pub fn is_quasi(&self) -> bool {
        !matches!(self, SimulationMethod::StandardMonteCarlo)
    }
}

impl fmt::Display for SimulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "smc" | "mc" | "standard" | "standardmontecarlo" | "montecarlo" => {
                Ok(SimulationMethod::StandardMonteCarlo)
            }
            "qmc" | "quasi" | "quasimontecarlo" => Ok(SimulationMethod::QuasiMonteCarlo),
            "rqmc" | "randomizedquasi" | "randomisedquasi" | "randomizedquasimontecarlo"
            | "randomisedquasimontecarlo" => Ok(SimulationMethod::RandomizedQuasiMonteCarlo),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_names() {
        for method in SimulationMethod::all() {
            assert_eq!(method.short_name().parse::<SimulationMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_parse_long_names() {
        assert_eq!(
            "Quasi-Monte Carlo".parse::<SimulationMethod>().unwrap(),
            SimulationMethod::QuasiMonteCarlo
        );
        assert_eq!(
            "randomized_quasi_monte_carlo".parse::<SimulationMethod>().unwrap(),
            SimulationMethod::RandomizedQuasiMonteCarlo
        );
        assert_eq!(
            SimulationMethod::StandardMonteCarlo
                .to_string()
                .parse::<SimulationMethod>()
                .unwrap(),
            SimulationMethod::StandardMonteCarlo
        );
    }

    #[test]
    fn test_unknown_method() {
        assert_eq!(
            "sobol".parse::<SimulationMethod>(),
            Err(ConfigError::UnknownMethod("sobol".to_string()))
        );
    }

    #[test]
    fn test_is_quasi() {
        assert!(!SimulationMethod::StandardMonteCarlo.is_quasi());
        assert!(SimulationMethod::QuasiMonteCarlo.is_quasi());
        assert!(SimulationMethod::RandomizedQuasiMonteCarlo.is_quasi());
    }
}
