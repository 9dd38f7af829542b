#![forbid(unsafe_code)]

pub mod answer;
pub mod config;
pub mod engine;
pub mod error;
pub mod hazard;
pub mod matcher;
pub mod preselect;
pub mod profile;
pub mod rule;
pub mod scorer;
pub mod store;
pub mod strategy;

pub use answer::{AnswerValue, Answers};
pub use config::{EngineConfig, PreselectionPolicy, ScoreWeights};
pub use engine::{Assessment, RiskEngine};
pub use error::{Error, Result};
pub use hazard::HazardKind;
pub use matcher::match_strategies;
pub use preselect::is_preselected;
pub use profile::{
    ExposureEntry, LocationRiskProfile, VulnerabilityProfile, DEFAULT_LOCATION_RISK,
    DEFAULT_VULNERABILITY, LEVEL_MAX, LEVEL_MIN,
};
pub use rule::{partition_valid, ConditionKind, MultiplierRule, RuleDiagnostic, RuleSet};
pub use scorer::{AppliedMultiplier, RiskBand, RiskScoreResult, RiskScorer};
pub use store::{
    InMemoryProfileStore, InMemoryRuleStore, InMemoryStrategyStore, ProfileStore, RuleStore,
    StrategyStore,
};
pub use strategy::{PriorityTier, Strategy, StrategyCatalog};
