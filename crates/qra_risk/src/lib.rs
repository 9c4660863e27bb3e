//! # QRA Risk (L4: Application)
//!
//! Post-hoc analytics over a [`SimulationResult`](qra_simulation::mc::SimulationResult).
//!
//! This crate provides:
//! - Loss exceedance curves
//! - MaRiQ portfolio analysis: total risk profile against a tolerance
//!   curve, per-risk expected loss and ranking
//! - Tornado variations (P5/P95 swings around the mean)
//! - Single-risk summary tables and exceedance curves
//!
//! All computations are data-only; rendering is left to callers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              qra_risk (L4)              │
//! │  analysis/  - exceedance, MaRiQ,        │
//! │               tornado, single risk      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           qra_simulation (L3)           │
//! │  SMC / QMC / RQMC simulators            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use qra_models::distributions::DistributionModel;
//! use qra_models::risk::{Portfolio, Risk};
//! use qra_risk::analysis::{MariqAnalysis, RiskTolerance};
//! use qra_simulation::mc::{SimulationConfig, StandardMonteCarlo};
//!
//! let portfolio = Portfolio::new(vec![Risk::new(
//!     "R1",
//!     "Outage",
//!     DistributionModel::uniform(1.0, 3.0).unwrap(),
//!     DistributionModel::pert(10.0, 20.0, 40.0).unwrap(),
//! )])
//! .unwrap();
//! let config = SimulationConfig::builder().n_iterations(2000).seed(3).build().unwrap();
//! let result = StandardMonteCarlo::standard(config).simulation(&portfolio).unwrap();
//!
//! let tolerance = RiskTolerance::new(vec![50.0, 150.0], vec![50.0, 1.0]).unwrap();
//! let mariq = MariqAnalysis::new(&result).with_tolerance(tolerance);
//! let profile = mariq.total_risk_profile(100).unwrap();
//! assert_eq!(profile.curve.thresholds.len(), 100);
//! assert_eq!(mariq.risk_ranking(5)[0].metrics.id.as_str(), "R1");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
