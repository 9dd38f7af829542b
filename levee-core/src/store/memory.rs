#![forbid(unsafe_code)]

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{ProfileStore, RuleStore, StrategyStore};
use crate::profile::{LocationRiskProfile, VulnerabilityProfile};
use crate::rule::MultiplierRule;
use crate::strategy::Strategy;
use crate::{Error, Result};

#[derive(Default)]
pub struct InMemoryProfileStore {
    locations: RwLock<IndexMap<String, LocationRiskProfile>>,
    business_types: RwLock<IndexMap<String, VulnerabilityProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn location_profile(&self, location_id: &str) -> Result<Option<LocationRiskProfile>> {
        Ok(self.locations.read().get(location_id).cloned())
    }

    fn vulnerability_profile(
        &self,
        business_type_id: &str,
    ) -> Result<Option<VulnerabilityProfile>> {
        Ok(self.business_types.read().get(business_type_id).cloned())
    }

    fn upsert_location(&self, profile: LocationRiskProfile) -> Result<()> {
        profile.validate()?;
        self.locations
            .write()
            .insert(profile.location_id.clone(), profile);
        Ok(())
    }

    fn upsert_vulnerability(&self, profile: VulnerabilityProfile) -> Result<()> {
        profile.validate()?;
        self.business_types
            .write()
            .insert(profile.business_type_id.clone(), profile);
        Ok(())
    }

    fn list_locations(&self) -> Result<Vec<String>> {
        Ok(self.locations.read().keys().cloned().collect())
    }

    fn list_business_types(&self) -> Result<Vec<String>> {
        Ok(self.business_types.read().keys().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryRuleStore {
    rules: RwLock<IndexMap<String, MultiplierRule>>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleStore for InMemoryRuleStore {
    fn active_rules(&self) -> Result<Vec<MultiplierRule>> {
        Ok(self
            .rules
            .read()
            .values()
            .filter(|r| r.active)
            .cloned()
            .collect())
    }

    fn list(&self) -> Result<Vec<MultiplierRule>> {
        Ok(self.rules.read().values().cloned().collect())
    }

    fn upsert(&self, rule: MultiplierRule) -> Result<()> {
        if rule.id.is_empty() {
            return Err(Error::Storage("rule id is required".into()));
        }
        self.rules.write().insert(rule.id.clone(), rule);
        Ok(())
    }

    fn set_active(&self, id: &str, active: bool) -> Result<()> {
        let mut rules = self.rules.write();
        let rule = rules
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("rule {id}")))?;
        rule.active = active;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStrategyStore {
    strategies: RwLock<IndexMap<String, Strategy>>,
}

impl InMemoryStrategyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrategyStore for InMemoryStrategyStore {
    fn catalog(&self) -> Result<Vec<Strategy>> {
        Ok(self.strategies.read().values().cloned().collect())
    }

    fn upsert(&self, strategy: Strategy) -> Result<()> {
        strategy.validate()?;
        self.strategies
            .write()
            .insert(strategy.id.clone(), strategy);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::HazardKind;
    use crate::rule::ConditionKind;
    use std::collections::BTreeSet;

    #[test]
    fn test_profile_store_round_trip() {
        let store = InMemoryProfileStore::new();
        let profile =
            LocationRiskProfile::new("coastal-01").with_exposure(HazardKind::Hurricane, 8.0);
        store.upsert_location(profile).unwrap();

        let loaded = store.location_profile("coastal-01").unwrap().unwrap();
        assert_eq!(loaded.level(HazardKind::Hurricane), 8.0);
        assert!(store.location_profile("nowhere").unwrap().is_none());
        assert_eq!(store.list_locations().unwrap(), vec!["coastal-01"]);
    }

    #[test]
    fn test_upsert_rejects_invalid_profile() {
        let store = InMemoryProfileStore::new();
        let profile = LocationRiskProfile::new("bad").with_exposure(HazardKind::Flood, 99.0);
        assert!(store.upsert_location(profile).is_err());
    }

    #[test]
    fn test_rule_store_active_filter_and_toggle() {
        let store = InMemoryRuleStore::new();
        let rule = MultiplierRule {
            id: "imports-overseas".into(),
            name: "Imports overseas".into(),
            target_characteristic: "imports_overseas".into(),
            condition: ConditionKind::Boolean,
            threshold: None,
            range_min: None,
            range_max: None,
            factor: 1.3,
            applicable_hazards: BTreeSet::from([HazardKind::SupplyChain]),
            active: true,
            order: 0,
        };
        store.upsert(rule).unwrap();
        assert_eq!(store.active_rules().unwrap().len(), 1);

        store.set_active("imports-overseas", false).unwrap();
        assert!(store.active_rules().unwrap().is_empty());
        assert_eq!(store.list().unwrap().len(), 1);

        assert!(store.set_active("missing", true).is_err());
    }
}
