#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::hazard::HazardKind;
use crate::{Error, Result};

/// Priority tier of a mitigation strategy. Ordering is the ranking
/// order: `Critical` sorts above `High`, and so on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityTier::Low => write!(f, "low"),
            PriorityTier::Medium => write!(f, "medium"),
            PriorityTier::High => write!(f, "high"),
            PriorityTier::Critical => write!(f, "critical"),
        }
    }
}

/// A catalogued mitigation action, tagged with the hazards it
/// addresses and the business types it is recommended for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub applicable_hazards: BTreeSet<HazardKind>,
    /// Empty means the strategy applies to every business type.
    #[serde(default)]
    pub recommended_business_types: BTreeSet<String>,
    pub tier: PriorityTier,
    pub effectiveness: f64,
}

impl Strategy {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::CatalogValidation("strategy id is required".into()));
        }
        if !self
            .id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(Error::CatalogValidation(format!(
                "strategy id '{}' must be lowercase alphanumeric with hyphens",
                self.id
            )));
        }
        if self.name.is_empty() {
            return Err(Error::CatalogValidation(format!(
                "strategy '{}' requires a name",
                self.id
            )));
        }
        if self.applicable_hazards.is_empty() {
            return Err(Error::CatalogValidation(format!(
                "strategy '{}' must address at least one hazard",
                self.id
            )));
        }
        if !self.effectiveness.is_finite() || !(0.0..=10.0).contains(&self.effectiveness) {
            return Err(Error::CatalogValidation(format!(
                "strategy '{}' effectiveness must be between 0 and 10, got {}",
                self.id, self.effectiveness
            )));
        }
        Ok(())
    }

    /// Whether the strategy is recommended for the business type. An
    /// empty recommendation set is an open catalogue item.
    pub fn recommended_for(&self, business_type_id: &str) -> bool {
        self.recommended_business_types.is_empty()
            || self.recommended_business_types.contains(business_type_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyCatalog {
    pub name: String,
    pub strategies: Vec<Strategy>,
}

impl StrategyCatalog {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: StrategyCatalog =
            serde_yaml::from_str(yaml).map_err(|e| Error::CatalogParse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: StrategyCatalog =
            serde_json::from_str(json).map_err(|e| Error::CatalogParse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::CatalogValidation("catalog name is required".into()));
        }
        let mut seen = BTreeSet::new();
        for strategy in &self.strategies {
            strategy.validate()?;
            if !seen.insert(strategy.id.as_str()) {
                return Err(Error::CatalogValidation(format!(
                    "duplicate strategy id '{}'",
                    strategy.id
                )));
            }
        }
        Ok(())
    }
}
