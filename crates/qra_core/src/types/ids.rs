//! Identifier types for risk entities.
//!
//! Risks are keyed by a string identifier that is unique within a
//! portfolio. The newtype keeps identifiers from being mixed up with
//! risk names or other free-form strings.

use std::fmt;

/// Unique identifier for a risk scenario.
///
/// # Examples
///
/// ```
/// use qra_core::types::RiskId;
///
/// let id = RiskId::new("R001");
/// assert_eq!(id.as_str(), "R001");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RiskId(String);

impl RiskId {
    /// Creates a new risk ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RiskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RiskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RiskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_risk_id_creation() {
        let id = RiskId::new("R001");
        assert_eq!(id.as_str(), "R001");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_risk_id_from_str_and_string() {
        let a: RiskId = "R002".into();
        let b: RiskId = String::from("R002").into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_risk_id_display() {
        assert_eq!(format!("{}", RiskId::new("CYBER-1")), "CYBER-1");
    }

    #[test]
    fn test_risk_id_hash() {
        let mut set = HashSet::new();
        set.insert(RiskId::new("R1"));
        set.insert(RiskId::new("R2"));
        set.insert(RiskId::new("R1")); // Duplicate
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(RiskId::default().is_empty());
    }
}
