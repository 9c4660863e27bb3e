//! Declarative risk definitions.
//!
//! These are the shapes the CLI reads from `[[risks]]` tables:
//!
//! ```toml
//! [[risks]]
//! id = "R001"
//! name = "Ransomware outbreak"
//! frequency = { distribution = "Uniform", parameters = { low = 0.5, high = 2.0 } }
//! impact = { distribution = "PERT", parameters = { low = 1e4, mode = 5e4, high = 4e5 } }
//! ```

use qra_core::types::RiskId;

use super::error::PortfolioError;
use super::risk::Risk;
use crate::distributions::{DistributionModel, ParameterSet};

/// A distribution named by tag with its parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionSpec {
    /// Tag, e.g. `"Lognormal"`.
    pub distribution: String,
    /// Named parameters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: ParameterSet,
}

impl DistributionSpec {
    /// Creates a spec from a tag and `(name, value)` pairs.
    pub fn new(distribution: impl Into<String>, parameters: &[(&str, f64)]) -> Self {
        Self {
            distribution: distribution.into(),
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    /// Fits the named distribution.
    pub fn build(&self) -> Result<DistributionModel, qra_core::types::DistributionError> {
        DistributionModel::from_tag(&self.distribution, &self.parameters)
    }
}

/// Declarative form of a [`Risk`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskDefinition {
    /// Identifier; generated when empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Occurrence-rate distribution.
    pub frequency: DistributionSpec,
    /// Impact distribution.
    pub impact: DistributionSpec,
}

impl RiskDefinition {
    /// Id used for the definition at `position` in a list.
    pub fn resolved_id(&self, position: usize) -> RiskId {
        if self.id.trim().is_empty() {
            RiskId::new(format!("RISK-{}", position + 1))
        } else {
            RiskId::new(self.id.trim())
        }
    }

    /// Fits both distributions and builds the risk.
    ///
    /// # Errors
    ///
    /// `InvalidDefinition` carrying the resolved id and the distribution
    /// error.
    pub fn to_risk(&self, position: usize) -> Result<Risk, PortfolioError> {
        let id = self.resolved_id(position);
        let wrap = |source| PortfolioError::InvalidDefinition {
            id: id.clone(),
            source,
        };
        let frequency = self.frequency.build().map_err(wrap)?;
        let impact = self.impact.build().map_err(wrap)?;
        Ok(Risk::new(id.clone(), self.name.clone(), frequency, impact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::DistributionKind;
    use crate::risk::Portfolio;
    use qra_core::types::DistributionError;

    fn definition(id: &str) -> RiskDefinition {
        RiskDefinition {
            id: id.to_string(),
            name: "Outage".to_string(),
            frequency: DistributionSpec::new("Beta", &[("alpha", 2.0), ("beta", 8.0)]),
            impact: DistributionSpec::new("Lognormal", &[("low", 10.0), ("high", 100.0)]),
        }
    }

    #[test]
    fn test_to_risk() {
        let risk = definition("R9").to_risk(0).unwrap();
        assert_eq!(risk.id().as_str(), "R9");
        assert_eq!(risk.frequency_kind(), DistributionKind::Beta);
        assert_eq!(risk.impact_kind(), DistributionKind::Lognormal);
    }

    #[test]
    fn test_generated_ids() {
        let defs = vec![definition(""), definition("X"), definition("  ")];
        let portfolio = Portfolio::from_definitions(&defs).unwrap();
        let ids: Vec<String> = portfolio.ids().iter().map(|i| i.to_string()).collect();
        assert_eq!(ids, vec!["RISK-1", "X", "RISK-3"]);
    }

    #[test]
    fn test_invalid_definition_reports_id() {
        let mut def = definition("BAD");
        def.impact = DistributionSpec::new("Gamma", &[]);
        let err = def.to_risk(0).unwrap_err();
        match err {
            PortfolioError::InvalidDefinition { id, source } => {
                assert_eq!(id.as_str(), "BAD");
                assert_eq!(source, DistributionError::UnknownKind("Gamma".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_definitions() {
        let defs = vec![definition("A"), definition("A")];
        assert!(matches!(
            Portfolio::from_definitions(&defs),
            Err(PortfolioError::DuplicateRisk(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_from_toml() {
        #[derive(serde::Deserialize)]
        struct File {
            risks: Vec<RiskDefinition>,
        }

        let text = r#"
            [[risks]]
            id = "R001"
            name = "Ransomware outbreak"
            frequency = { distribution = "Uniform", parameters = { low = 0.5, high = 2 } }
            impact = { distribution = "PERT", parameters = { low = 1e4, mean = 5e4, high = 4e5 } }

            [[risks]]
            name = "Unnamed"
            frequency = { distribution = "beta", parameters = { alpha = 1, beta = 4 } }
            impact = { distribution = "lognormal", parameters = { low = 100, high = 1000 } }
        "#;
        let file: File = toml::from_str(text).unwrap();
        assert_eq!(file.risks.len(), 2);
        assert_eq!(file.risks[0].frequency.parameters["high"], 2.0);

        let portfolio = Portfolio::from_definitions(&file.risks).unwrap();
        assert_eq!(portfolio.by_index(1).unwrap().id().as_str(), "RISK-2");
        assert_eq!(
            portfolio.by_id("R001").unwrap().impact_kind(),
            DistributionKind::Pert
        );
    }
}
