//! Ordered, id-indexed risk collection.

use std::collections::HashMap;

use qra_core::traits::SampleDistribution;
use qra_core::types::RiskId;

use super::definition::RiskDefinition;
use super::error::PortfolioError;
use super::risk::Risk;
use crate::distributions::DistributionModel;

/// An ordered collection of risks with unique ids.
///
/// Insertion order is preserved; simulation results are reported in the
/// same order.
///
/// # Examples
///
/// ```
/// use qra_models::distributions::DistributionModel;
/// use qra_models::risk::{Portfolio, PortfolioError, Risk};
///
/// let model = || DistributionModel::uniform(1.0, 2.0).unwrap();
/// let portfolio = Portfolio::new(vec![
///     Risk::new("A", "Flood", model(), model()),
///     Risk::new("B", "Fire", model(), model()),
/// ])
/// .unwrap();
///
/// assert_eq!(portfolio.by_index(1).unwrap().name(), "Fire");
/// assert!(matches!(portfolio.by_id("C"), Err(PortfolioError::RiskNotFound(_))));
/// ```
#[derive(Clone, Debug)]
pub struct Portfolio<D = DistributionModel> {
    risks: Vec<Risk<D>>,
    index: HashMap<RiskId, usize>,
}

impl<D: SampleDistribution> Portfolio<D> {
    /// Builds a portfolio, rejecting duplicate ids.
    pub fn new(risks: Vec<Risk<D>>) -> Result<Self, PortfolioError> {
        let mut index = HashMap::with_capacity(risks.len());
        for (position, risk) in risks.iter().enumerate() {
            if index.insert(risk.id().clone(), position).is_some() {
                return Err(PortfolioError::DuplicateRisk(risk.id().clone()));
            }
        }
        Ok(Self { risks, index })
    }

    /// Number of risks.
    #[inline]
    pub fn len(&self) -> usize {
        self.risks.len()
    }

    /// Returns `true` if the portfolio holds no risks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    /// Iterates risks in portfolio order.
    pub fn iter(&self) -> std::slice::Iter<'_, Risk<D>> {
        self.risks.iter()
    }

    /// All risks in portfolio order.
    pub fn risks(&self) -> &[Risk<D>] {
        &self.risks
    }

    /// Risk at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Risk<D>> {
        self.risks.get(index)
    }

    /// Risk at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index >= len()`.
    pub fn by_index(&self, index: usize) -> Result<&Risk<D>, PortfolioError> {
        self.risks.get(index).ok_or(PortfolioError::IndexOutOfRange {
            index,
            len: self.risks.len(),
        })
    }

    /// Risk with the given id.
    ///
    /// # Errors
    ///
    /// `RiskNotFound` for an unknown id.
    pub fn by_id(&self, id: impl AsRef<str>) -> Result<&Risk<D>, PortfolioError> {
        let id = id.as_ref();
        self.position(id)
            .map(|i| &self.risks[i])
            .ok_or_else(|| PortfolioError::RiskNotFound(RiskId::new(id)))
    }

    /// Position of the risk with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(&RiskId::new(id)).copied()
    }

    /// Ids in portfolio order.
    pub fn ids(&self) -> Vec<RiskId> {
        self.risks.iter().map(|r| r.id().clone()).collect()
    }

    /// Risks whose id or name contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&Risk<D>> {
        let needle = term.to_lowercase();
        self.risks
            .iter()
            .filter(|r| {
                r.id().as_str().to_lowercase().contains(&needle)
                    || r.name().to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Portfolio<DistributionModel> {
    /// Builds a portfolio from declarative definitions.
    ///
    /// Definitions without an id are assigned `RISK-<n>`, `n` being the
    /// one-based position.
    pub fn from_definitions(definitions: &[RiskDefinition]) -> Result<Self, PortfolioError> {
        let risks = definitions
            .iter()
            .enumerate()
            .map(|(position, def)| def.to_risk(position))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(risks)
    }
}

impl<'a, D> IntoIterator for &'a Portfolio<D> {
    type Item = &'a Risk<D>;
    type IntoIter = std::slice::Iter<'a, Risk<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.risks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> DistributionModel {
        DistributionModel::uniform(1.0, 2.0).unwrap()
    }

    fn portfolio() -> Portfolio {
        Portfolio::new(vec![
            Risk::new("IT-01", "Ransomware", model(), model()),
            Risk::new("OP-02", "Warehouse fire", model(), model()),
            Risk::new("IT-03", "Phishing", model(), model()),
        ])
        .unwrap()
    }

    #[test]
    fn test_order_preserved() {
        let p = portfolio();
        let ids: Vec<String> = p.ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["IT-01", "OP-02", "IT-03"]);
        assert_eq!(p.len(), 3);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_lookup() {
        let p = portfolio();
        assert_eq!(p.by_id("OP-02").unwrap().name(), "Warehouse fire");
        assert_eq!(p.position("IT-03"), Some(2));
        assert!(p.get(3).is_none());
        assert!(matches!(
            p.by_index(3),
            Err(PortfolioError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(p.by_id("XX"), Err(PortfolioError::RiskNotFound(_))));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Portfolio::new(vec![
            Risk::new("A", "one", model(), model()),
            Risk::new("A", "two", model(), model()),
        ])
        .unwrap_err();
        assert!(matches!(err, PortfolioError::DuplicateRisk(id) if id.as_str() == "A"));
    }

    #[test]
    fn test_search_case_insensitive() {
        let p = portfolio();
        let hits: Vec<&str> = p.search("it-").iter().map(|r| r.id().as_str()).collect();
        assert_eq!(hits, vec!["IT-01", "IT-03"]);
        assert_eq!(p.search("FIRE").len(), 1);
        assert!(p.search("flood").is_empty());
    }

    #[test]
    fn test_empty_portfolio() {
        let p: Portfolio = Portfolio::new(Vec::new()).unwrap();
        assert!(p.is_empty());
        assert!(p.ids().is_empty());
    }

    #[test]
    fn test_iteration() {
        let p = portfolio();
        assert_eq!((&p).into_iter().count(), 3);
        assert_eq!(p.iter().map(|r| r.name().len()).sum::<usize>(), 10 + 14 + 8);
    }
}
