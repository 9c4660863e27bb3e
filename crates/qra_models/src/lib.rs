//! # QRA Models (L2: Business Logic)
//!
//! Frequency and impact distributions, risk scenarios and portfolios.
//!
//! This crate provides:
//! - Distributions fitted from expert estimates (Beta, Uniform, Lognormal, PERT)
//! - A closed `DistributionModel` enum with a tag-driven registry
//! - `Risk`: an identified pairing of a frequency and an impact distribution
//! - `Portfolio`: an ordered, id-indexed collection of risks
//! - `RiskDefinition`: serialisable risk declarations for configuration files
//!
//! ## Design Principles
//!
//! - **Enum-based distributions** for static dispatch
//! - **Fit once at construction**: parameters are validated and fitted up front,
//!   sampling never mutates the distribution
//! - **Generic containers**: `Risk<D>` and `Portfolio<D>` accept any
//!   [`SampleDistribution`](qra_core::traits::SampleDistribution), defaulting
//!   to `DistributionModel`
//!
//! ## Example
//!
//! ```
//! use qra_models::distributions::DistributionModel;
//! use qra_models::risk::{Portfolio, Risk};
//!
//! let frequency = DistributionModel::uniform(0.5, 2.0).unwrap();
//! let impact = DistributionModel::lognormal(10_000.0, 250_000.0).unwrap();
//! let risk = Risk::new("R001", "Ransomware outbreak", frequency, impact);
//!
//! let portfolio = Portfolio::new(vec![risk]).unwrap();
//! assert_eq!(portfolio.len(), 1);
//! assert_eq!(portfolio.by_id("R001").unwrap().name(), "Ransomware outbreak");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod distributions;
pub mod risk;

pub use distributions::{DistributionKind, DistributionModel, ParameterSet};
pub use risk::{DistributionSpec, Portfolio, PortfolioError, Risk, RiskDefinition};
