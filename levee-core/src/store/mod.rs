#![forbid(unsafe_code)]

mod memory;

use crate::profile::{LocationRiskProfile, VulnerabilityProfile};
use crate::rule::MultiplierRule;
use crate::strategy::Strategy;
use crate::Result;

pub use memory::{InMemoryProfileStore, InMemoryRuleStore, InMemoryStrategyStore};

/// Reference-data lookups the engine consumes. Implementations are
/// maintained by external collaborators; the engine never writes
/// through them during an assessment.
pub trait ProfileStore: Send + Sync {
    fn location_profile(&self, location_id: &str) -> Result<Option<LocationRiskProfile>>;
    fn vulnerability_profile(
        &self,
        business_type_id: &str,
    ) -> Result<Option<VulnerabilityProfile>>;
    fn upsert_location(&self, profile: LocationRiskProfile) -> Result<()>;
    fn upsert_vulnerability(&self, profile: VulnerabilityProfile) -> Result<()>;
    fn list_locations(&self) -> Result<Vec<String>>;
    fn list_business_types(&self) -> Result<Vec<String>>;
}

pub trait RuleStore: Send + Sync {
    /// Rules flagged active, as stored. Malformed entries are still
    /// returned; the engine partitions them out with diagnostics.
    fn active_rules(&self) -> Result<Vec<MultiplierRule>>;
    fn list(&self) -> Result<Vec<MultiplierRule>>;
    fn upsert(&self, rule: MultiplierRule) -> Result<()>;
    fn set_active(&self, id: &str, active: bool) -> Result<()>;
}

pub trait StrategyStore: Send + Sync {
    fn catalog(&self) -> Result<Vec<Strategy>>;
    fn upsert(&self, strategy: Strategy) -> Result<()>;
}
