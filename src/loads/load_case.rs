//! Named load cases

use serde::{Deserialize, Serialize};

/// Descriptor for a group of loads
///
/// Loads refer to their case by name. Registering a `LoadCase` on the model
/// attaches a description and lets a combination refer to a case that has
/// no loads yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LoadCase {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
        }
    }

    /// Attach a free-text description
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Permanent actions, including self-weight
    pub fn dead() -> Self {
        Self::new("Dead").describe("Self-weight and permanent loads")
    }

    /// Imposed occupancy actions
    pub fn live() -> Self {
        Self::new("Live").describe("Occupancy loads")
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        Self::new("Case 1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_optional_in_json() {
        let json = serde_json::to_string(&LoadCase::new("Wind")).unwrap();
        assert_eq!(json, r#"{"name":"Wind"}"#);

        let case: LoadCase = serde_json::from_str(&json).unwrap();
        assert_eq!(case.description, None);
        assert_eq!(LoadCase::dead().name, "Dead");
    }
}
