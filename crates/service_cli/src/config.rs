//! CLI configuration management
//!
//! Loads `qra.toml`, then applies `QRA_*` environment variables, then
//! command-line flags.
//!
//! ```toml
//! [simulation]
//! method = "rqmc"
//! iterations = 10000
//! seed = 42
//! log_level = "info"
//!
//! [tolerance]
//! losses = [1e5, 1e6]
//! probabilities_pct = [50.0, 1.0]
//!
//! [[risks]]
//! id = "R001"
//! name = "Ransomware outbreak"
//! frequency = { distribution = "Uniform", parameters = { low = 0.5, high = 2.0 } }
//! impact = { distribution = "PERT", parameters = { low = 1e4, mode = 5e4, high = 4e5 } }
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use qra_models::{Portfolio, RiskDefinition};
use qra_risk::analysis::{AnalysisError, RiskTolerance};
use qra_simulation::mc::{SimulationConfig, SimulationMethod, DEFAULT_BURN_IN};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid simulation settings: {0}")]
    Simulation(#[from] qra_simulation::mc::ConfigError),

    #[error("Invalid tolerance: {0}")]
    Tolerance(#[from] AnalysisError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[simulation]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Sampling method
    #[serde(deserialize_with = "deserialize_method")]
    pub method: SimulationMethod,
    /// Simulated years per risk
    pub iterations: usize,
    /// Base seed; random when absent
    pub seed: Option<u64>,
    /// Worker threads; host CPU count when absent
    pub max_parallelism: Option<usize>,
    /// Sobol points skipped before sampling
    pub burn_in: u64,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_method<'de, D>(deserializer: D) -> Result<SimulationMethod, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    SimulationMethod::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            method: SimulationMethod::StandardMonteCarlo,
            iterations: 10_000,
            seed: None,
            max_parallelism: None,
            burn_in: DEFAULT_BURN_IN,
            log_level: LogLevel::Info,
        }
    }
}

/// `[tolerance]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToleranceSettings {
    /// Loss levels
    pub losses: Vec<f64>,
    /// Tolerated exceedance probabilities in percent
    pub probabilities_pct: Vec<f64>,
}

/// Full `qra.toml` contents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QraConfig {
    /// Simulation settings
    pub simulation: SimulationSettings,
    /// Optional risk tolerance curve
    pub tolerance: Option<ToleranceSettings>,
    /// Risk register
    pub risks: Vec<RiskDefinition>,
}

impl QraConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Apply `QRA_*` overrides read through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = &mut self.simulation;
        if let Some(method) = lookup("QRA_METHOD") {
            settings.method = SimulationMethod::from_str(&method)?;
        }
        if let Some(n) = lookup("QRA_ITERATIONS") {
            settings.iterations = parse_value("QRA_ITERATIONS", &n)?;
        }
        if let Some(seed) = lookup("QRA_SEED") {
            settings.seed = Some(parse_value("QRA_SEED", &seed)?);
        }
        if let Some(threads) = lookup("QRA_MAX_PARALLELISM") {
            settings.max_parallelism = Some(parse_value("QRA_MAX_PARALLELISM", &threads)?);
        }
        if let Some(burn_in) = lookup("QRA_BURN_IN") {
            settings.burn_in = parse_value("QRA_BURN_IN", &burn_in)?;
        }
        if let Some(level) = lookup("QRA_LOG_LEVEL") {
            settings.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Apply `QRA_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        let settings = &mut self.simulation;
        if let Some(method) = &cli.method {
            settings.method = SimulationMethod::from_str(method)?;
        }
        if let Some(n) = cli.iterations {
            settings.iterations = n;
        }
        if let Some(seed) = cli.seed {
            settings.seed = Some(seed);
        }
        if let Some(threads) = cli.threads {
            settings.max_parallelism = Some(threads);
        }
        if cli.verbose {
            settings.log_level = LogLevel::Debug;
        }
        Ok(())
    }

    /// Validated engine configuration
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        let settings = &self.simulation;
        let mut builder = SimulationConfig::builder()
            .n_iterations(settings.iterations)
            .maybe_seed(settings.seed)
            .burn_in(settings.burn_in);
        if let Some(threads) = settings.max_parallelism {
            builder = builder.max_parallelism(threads);
        }
        Ok(builder.build()?)
    }

    /// Validated tolerance curve, if configured
    pub fn risk_tolerance(&self) -> Result<Option<RiskTolerance>, ConfigError> {
        self.tolerance
            .as_ref()
            .map(|t| RiskTolerance::new(t.losses.clone(), t.probabilities_pct.clone()))
            .transpose()
            .map_err(ConfigError::from)
    }

    /// Builds the portfolio declared by `[[risks]]`
    pub fn portfolio(&self) -> Result<Portfolio, qra_models::PortfolioError> {
        Portfolio::from_definitions(&self.risks)
    }

    /// Validate everything except the risk register
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation_config()?;
        self.risk_tolerance()?;
        Ok(())
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Method override
    pub method: Option<String>,
    /// Iteration count override
    pub iterations: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Thread count override
    pub threads: Option<usize>,
    /// Raise logging to debug
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<QraConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => QraConfig::from_file(path)?,
        None => QraConfig::default(),
    };
    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
        [simulation]
        method = "qmc"
        iterations = 2048
        seed = 7
        burn_in = 64
        log_level = "warn"

        [tolerance]
        losses = [1000.0, 5000.0]
        probabilities_pct = [20.0, 1.0]

        [[risks]]
        id = "R1"
        name = "Outage"
        frequency = { distribution = "Uniform", parameters = { low = 1.0, high = 3.0 } }
        impact = { distribution = "PERT", parameters = { low = 10.0, mode = 20.0, high = 50.0 } }

        [[risks]]
        name = "Breach"
        frequency = { distribution = "Beta", parameters = { alpha = 2.0, beta = 5.0 } }
        impact = { distribution = "Lognormal", parameters = { low = 100.0, high = 1000.0 } }
    "#;

    #[test]
    fn test_default_config() {
        let config = QraConfig::default();
        assert_eq!(config.simulation.method, SimulationMethod::StandardMonteCarlo);
        assert_eq!(config.simulation.iterations, 10_000);
        assert_eq!(config.simulation.burn_in, DEFAULT_BURN_IN);
        assert_eq!(config.simulation.log_level, LogLevel::Info);
        assert!(config.tolerance.is_none());
        assert!(config.risks.is_empty());
    }

    #[test]
    fn test_toml_deserialization() {
        let config = QraConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.simulation.method, SimulationMethod::QuasiMonteCarlo);
        assert_eq!(config.simulation.iterations, 2048);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.burn_in, 64);
        assert_eq!(config.simulation.log_level, LogLevel::Warn);
        assert_eq!(config.risks.len(), 2);

        let portfolio = config.portfolio().unwrap();
        assert_eq!(portfolio.ids()[1].as_str(), "RISK-2");
        assert_eq!(config.risk_tolerance().unwrap().unwrap().len(), 2);

        let sim = config.simulation_config().unwrap();
        assert_eq!(sim.n_iterations(), 2048);
        assert_eq!(sim.seed(), Some(7));
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = QraConfig::from_toml("[simulation]\niterations = 500\n").unwrap();
        assert_eq!(config.simulation.iterations, 500);
        assert_eq!(config.simulation.method, SimulationMethod::StandardMonteCarlo);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            QraConfig::from_toml("[simulation]\nmethod = \"bogus\"\n"),
            Err(ConfigError::FileError(_))
        ));
        assert!(matches!(
            QraConfig::from_file(Path::new("/nonexistent/qra.toml")),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("QRA_METHOD", "rqmc"),
            ("QRA_ITERATIONS", "128"),
            ("QRA_SEED", "99"),
            ("QRA_MAX_PARALLELISM", "2"),
            ("QRA_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();
        let mut config = QraConfig::from_toml(SAMPLE).unwrap();
        config
            .apply_env_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.simulation.method, SimulationMethod::RandomizedQuasiMonteCarlo);
        assert_eq!(config.simulation.iterations, 128);
        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.simulation.max_parallelism, Some(2));
        assert_eq!(config.simulation.burn_in, 64);
        assert_eq!(config.simulation.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_env_invalid_value() {
        let mut config = QraConfig::default();
        let err = config
            .apply_env_with(|key| (key == "QRA_ITERATIONS").then(|| "many".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("QRA_ITERATIONS"));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = QraConfig::from_toml(SAMPLE).unwrap();
        let cli = CliArgs {
            method: Some("smc".to_string()),
            iterations: Some(64),
            seed: Some(1),
            threads: Some(1),
            verbose: true,
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.simulation.method, SimulationMethod::StandardMonteCarlo);
        assert_eq!(config.simulation.iterations, 64);
        assert_eq!(config.simulation.seed, Some(1));
        assert_eq!(config.simulation_config().unwrap().max_parallelism(), 1);
        assert_eq!(config.simulation.log_level, LogLevel::Debug);

        let bad = CliArgs {
            method: Some("bogus".to_string()),
            ..Default::default()
        };
        assert!(config.merge_with_cli(&bad).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = QraConfig::default();
        config.simulation.iterations = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Simulation(_))));

        let mut config = QraConfig::default();
        config.tolerance = Some(ToleranceSettings {
            losses: vec![1.0],
            probabilities_pct: vec![],
        });
        assert!(matches!(config.validate(), Err(ConfigError::Tolerance(_))));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }
}
