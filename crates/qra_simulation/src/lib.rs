//! # QRA Simulation (L3: Simulation Engine)
//!
//! Annual loss simulation for a portfolio of risks.
//!
//! For each risk and each of `N` simulated years the engine draws an
//! occurrence rate, thins it to an occurrence count through a Poisson
//! draw, draws one impact per occurrence and sums them into the year's
//! total. An additional single-risk impact is drawn per year, independent
//! of the count, for marginal attribution.
//!
//! Three sampling strategies are available:
//!
//! | Method | Source of uniforms | Notes |
//! |--------|--------------------|-------|
//! | Standard Monte Carlo | seeded PRNG | direct draws |
//! | Quasi-Monte Carlo | unscrambled Sobol | blocks shuffled per draw |
//! | Randomised QMC | scrambled Sobol | linear matrix scramble and digital shift |
//!
//! Risks are simulated in parallel on a Rayon pool; results are always
//! returned in portfolio order and each risk draws from its own seeded
//! stream, so a fixed seed reproduces the run regardless of scheduling.
//!
//! ## Module Structure
//!
//! - [`rng`]: PRNG wrapper, seed derivation, Sobol sequences
//! - [`mc`]: configuration, samplers, simulators and results
//!
//! ## Example
//!
//! ```
//! use qra_models::distributions::DistributionModel;
//! use qra_models::risk::{Portfolio, Risk};
//! use qra_simulation::mc::{QuasiMonteCarlo, SimulationConfig};
//!
//! let portfolio = Portfolio::new(vec![Risk::new(
//!     "R1",
//!     "Outage",
//!     DistributionModel::uniform(1.0, 3.0).unwrap(),
//!     DistributionModel::pert(10.0, 20.0, 40.0).unwrap(),
//! )])
//! .unwrap();
//!
//! let config = SimulationConfig::builder()
//!     .n_iterations(1024)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let result = QuasiMonteCarlo::quasi(config).simulation(&portfolio).unwrap();
//! let outcome = &result.results[0];
//! assert_eq!(outcome.total.len(), 1024);
//! assert_eq!(outcome.occurrences.iter().sum::<u64>() as usize, outcome.impact.len());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![allow(unknown_lints)]

pub mod mc;
pub mod rng;
