//! Risk simulation kernels.
//!
//! # Architecture
//!
//! ```text
//! Simulator<S: SamplingStrategy, O: OccurrenceModel>
//! ├── SimulationConfig   (iterations, seed, parallelism, burn-in)
//! ├── SamplingStrategy   (standard, quasi, randomised quasi)
//! │   └── RiskSampler    (per-risk random state)
//! ├── OccurrenceModel    (rate -> count, Poisson by default)
//! └── Orchestration
//!     ├── per-risk tasks on a Rayon pool, results in portfolio order
//!     ├── partition_totals()
//!     └── SimulationResult
//! ```
//!
//! # Sample layout
//!
//! For one risk with `N` years and `K` total occurrences, the quasi-random
//! strategies read a single Sobol sequence after `burn_in` skipped points:
//! frequency from points `[b, b+N)`, impacts from `[b+N, b+N+K)` and
//! single-risk impacts from `[b+N+K, b+2N+K)`.
//!
//! # Examples
//!
//! ```rust
//! use qra_models::distributions::DistributionModel;
//! use qra_models::risk::{Portfolio, Risk};
//! use qra_simulation::mc::{SimulationConfig, StandardMonteCarlo};
//!
//! let portfolio = Portfolio::new(vec![Risk::new(
//!     "R1",
//!     "Supplier insolvency",
//!     DistributionModel::uniform(0.1, 0.4).unwrap(),
//!     DistributionModel::pert(5e4, 1e5, 5e5).unwrap(),
//! )])
//! .unwrap();
//!
//! let config = SimulationConfig::builder()
//!     .n_iterations(1000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let result = StandardMonteCarlo::standard(config).simulation(&portfolio).unwrap();
//! let totals = result.portfolio_total();
//! assert_eq!(totals.len(), 1000);
//! assert!(totals.iter().all(|&t| t >= 0.0));
//! ```

mod aggregation;
mod config;
mod error;
mod method;
mod occurrence;
mod parallel;
mod result;
mod sampler;
mod simulator;

pub use aggregation::{occurrence_sum, partition_totals};
pub use config::{SimulationConfig, SimulationConfigBuilder, DEFAULT_BURN_IN};
pub use error::{ConfigError, SamplingError, SimulationError};
pub use method::SimulationMethod;
pub use occurrence::{OccurrenceModel, PoissonOccurrences};
pub use result::{RiskOutcome, SimulationResult, SimulationSummary, Years};
pub use sampler::{
    PseudoRandomSampler, QuasiRandomSampler, QuasiRandomSampling, RandomizedQuasiRandomSampling,
    RiskSampler, SampleStream, SamplingStrategy, StandardSampling,
};
pub use simulator::{
    run_simulation, QuasiMonteCarlo, RandomizedQuasiMonteCarlo, Simulator, StandardMonteCarlo,
};
