#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::answer::Answers;
use crate::config::EngineConfig;
use crate::hazard::HazardKind;
use crate::matcher::match_strategies;
use crate::profile::{LocationRiskProfile, VulnerabilityProfile};
use crate::rule::{partition_valid, RuleDiagnostic};
use crate::scorer::{RiskScoreResult, RiskScorer};
use crate::store::{ProfileStore, RuleStore, StrategyStore};
use crate::strategy::Strategy;
use crate::Result;

/// One full scoring pass: a score per hazard kind plus the envelope
/// metadata callers need for audit and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub location_id: String,
    pub business_type_id: String,
    pub results: Vec<RiskScoreResult>,
    /// Rules skipped because they failed validation; scoring carried
    /// on without them.
    pub diagnostics: Vec<RuleDiagnostic>,
    pub evaluated_at: DateTime<Utc>,
    pub evaluation_time_us: u64,
}

impl Assessment {
    pub fn preselected_hazards(&self) -> BTreeSet<HazardKind> {
        self.results
            .iter()
            .filter(|r| r.preselected)
            .map(|r| r.hazard)
            .collect()
    }
}

/// Front door of the engine: resolves reference-data snapshots from
/// the stores, runs the scorer over every hazard kind, and matches
/// strategies against the preselected ones. Each call works on its own
/// snapshot, so concurrent assessments need no coordination.
pub struct RiskEngine {
    profile_store: Arc<dyn ProfileStore>,
    rule_store: Arc<dyn RuleStore>,
    strategy_store: Arc<dyn StrategyStore>,
    scorer: RiskScorer,
}

impl RiskEngine {
    pub fn new(
        profile_store: Arc<dyn ProfileStore>,
        rule_store: Arc<dyn RuleStore>,
        strategy_store: Arc<dyn StrategyStore>,
        config: EngineConfig,
    ) -> Result<Self> {
        Ok(Self {
            profile_store,
            rule_store,
            strategy_store,
            scorer: RiskScorer::new(config)?,
        })
    }

    /// Scores every hazard kind for the given location and business
    /// type. Unknown ids are not errors: a growing catalog is expected
    /// to have gaps, and the per-hazard defaults (0 exposure, neutral
    /// vulnerability) cover them.
    pub fn compute_risk_profile(
        &self,
        location_id: &str,
        business_type_id: &str,
        answers: &Answers,
    ) -> Result<Assessment> {
        let start = Instant::now();

        let location = self
            .profile_store
            .location_profile(location_id)?
            .unwrap_or_else(|| LocationRiskProfile::empty(location_id));
        let vulnerability = self
            .profile_store
            .vulnerability_profile(business_type_id)?
            .unwrap_or_else(|| VulnerabilityProfile::empty(business_type_id));

        let (rules, diagnostics) = partition_valid(self.rule_store.active_rules()?);
        let results = self.scorer.score_all(&location, &vulnerability, answers, &rules);

        Ok(Assessment {
            id: Uuid::new_v4(),
            location_id: location_id.to_string(),
            business_type_id: business_type_id.to_string(),
            results,
            diagnostics,
            evaluated_at: Utc::now(),
            evaluation_time_us: start.elapsed().as_micros() as u64,
        })
    }

    /// Ranked mitigation strategies for an assessment's preselected
    /// hazards. An assessment with nothing preselected yields an empty
    /// list.
    pub fn recommend_strategies(&self, assessment: &Assessment) -> Result<Vec<Strategy>> {
        let preselected = assessment.preselected_hazards();
        let catalog = self.strategy_store.catalog()?;
        Ok(match_strategies(
            &catalog,
            &preselected,
            &assessment.business_type_id,
        ))
    }
}
