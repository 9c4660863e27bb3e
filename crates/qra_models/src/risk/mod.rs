//! Risk scenarios and portfolios.
//!
//! - [`Risk`]: an identified pairing of frequency and impact distributions
//! - [`Portfolio`]: ordered, id-indexed collection of risks
//! - [`RiskDefinition`]: declarative form read from configuration files
//! - [`PortfolioError`]: lookup and construction failures

mod definition;
mod error;
mod portfolio;
#[allow(clippy::module_inception)]
mod risk;

pub use definition::{DistributionSpec, RiskDefinition};
pub use error::PortfolioError;
pub use portfolio::Portfolio;
pub use risk::Risk;
