//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `qra` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A risk definition could not be turned into a risk.
    #[error("Portfolio error: {0}")]
    Portfolio(#[from] qra_models::PortfolioError),

    /// The simulation failed.
    #[error("Simulation error: {0}")]
    Simulation(#[from] qra_simulation::mc::SimulationError),

    /// Post-processing failed.
    #[error("Analysis error: {0}")]
    Analysis(#[from] qra_risk::analysis::AnalysisError),

    /// JSON output could not be written.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// A command-line value is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
