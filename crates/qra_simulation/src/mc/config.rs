//! Simulation configuration.
//!
//! Configuration types and builders for the risk simulators.

use super::error::ConfigError;

/// Sobol points discarded before the first draw.
pub const DEFAULT_BURN_IN: u64 = 30;

/// Simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use qra_simulation::mc::{SimulationConfig, DEFAULT_BURN_IN};
///
/// let config = SimulationConfig::builder()
///     .n_iterations(10_000)
///     .seed(42)
///     .max_parallelism(4)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_iterations(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.burn_in(), DEFAULT_BURN_IN);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of simulated years.
    n_iterations: usize,
    /// Base seed; a fresh one is drawn per call when absent.
    seed: Option<u64>,
    /// Upper bound on worker threads.
    max_parallelism: usize,
    /// Low-discrepancy points skipped before sampling.
    burn_in: u64,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Configuration with `n_iterations` and defaults elsewhere.
    pub fn with_iterations(n_iterations: usize) -> Result<Self, ConfigError> {
        Self::builder().n_iterations(n_iterations).build()
    }

    /// Returns the number of simulated years.
    #[inline]
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Returns the optional base seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the maximum number of worker threads.
    #[inline]
    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    /// Returns the number of skipped low-discrepancy points.
    #[inline]
    pub fn burn_in(&self) -> u64 {
        self.burn_in
    }

    /// Copy of this configuration with a different iteration count.
    pub fn with_n_iterations(&self, n_iterations: usize) -> Result<Self, ConfigError> {
        let config = Self {
            n_iterations,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_iterations` is 0
    /// - `max_parallelism` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_iterations == 0 {
            return Err(ConfigError::InvalidIterationCount(self.n_iterations));
        }
        if self.max_parallelism == 0 {
            return Err(ConfigError::InvalidParallelism(self.max_parallelism));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_iterations: Option<usize>,
    seed: Option<u64>,
    max_parallelism: Option<usize>,
    burn_in: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulated years (at least 1).
    #[inline]
    pub fn n_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = Some(n_iterations);
        self
    }

    /// Sets the base seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the base seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the maximum number of worker threads (at least 1).
    #[inline]
    pub fn max_parallelism(mut self, max_parallelism: usize) -> Self {
        self.max_parallelism = Some(max_parallelism);
        self
    }

    /// Sets the number of low-discrepancy points skipped before sampling.
    #[inline]
    pub fn burn_in(mut self, burn_in: u64) -> Self {
        self.burn_in = Some(burn_in);
        self
    }

    /// Builds the configuration, validating all parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `n_iterations` was never set
    /// - `InvalidIterationCount` / `InvalidParallelism` for zero values
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_iterations = self.n_iterations.ok_or(ConfigError::InvalidParameter {
            name: "n_iterations",
            value: "not set".to_string(),
        })?;

        let config = SimulationConfig {
            n_iterations,
            seed: self.seed,
            max_parallelism: self.max_parallelism.unwrap_or_else(num_cpus::get),
            burn_in: self.burn_in.unwrap_or(DEFAULT_BURN_IN),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SimulationConfig::builder().n_iterations(100).build().unwrap();
        assert_eq!(config.n_iterations(), 100);
        assert_eq!(config.seed(), None);
        assert_eq!(config.burn_in(), DEFAULT_BURN_IN);
        assert!(config.max_parallelism() >= 1);
    }

    #[test]
    fn test_builder_missing_iterations() {
        let err = SimulationConfig::builder().build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "n_iterations",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert_eq!(
            SimulationConfig::with_iterations(0),
            Err(ConfigError::InvalidIterationCount(0))
        );
    }

    #[test]
    fn test_zero_parallelism_rejected() {
        let err = SimulationConfig::builder()
            .n_iterations(10)
            .max_parallelism(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidParallelism(0));
    }

    #[test]
    fn test_with_n_iterations() {
        let config = SimulationConfig::builder()
            .n_iterations(10)
            .seed(3)
            .burn_in(0)
            .build()
            .unwrap();
        let larger = config.with_n_iterations(2048).unwrap();
        assert_eq!(larger.n_iterations(), 2048);
        assert_eq!(larger.seed(), Some(3));
        assert_eq!(larger.burn_in(), 0);
        assert!(config.with_n_iterations(0).is_err());
    }

    #[test]
    fn test_maybe_seed() {
        let config = SimulationConfig::builder()
            .n_iterations(1)
            .seed(9)
            .maybe_seed(None)
            .build()
            .unwrap();
        assert_eq!(config.seed(), None);
    }
}
