#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::answer::Answers;
use crate::config::EngineConfig;
use crate::hazard::HazardKind;
use crate::preselect::is_preselected;
use crate::profile::{LocationRiskProfile, VulnerabilityProfile, LEVEL_MAX, LEVEL_MIN};
use crate::rule::MultiplierRule;
use crate::Result;

/// Coarse banding of a final score, for presentation. Preselection
/// does not read this; it uses [`crate::config::PreselectionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 4.0 => RiskBand::Low,
            s if s < 6.0 => RiskBand::Medium,
            s if s < 8.0 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => write!(f, "low"),
            RiskBand::Medium => write!(f, "medium"),
            RiskBand::High => write!(f, "high"),
            RiskBand::Critical => write!(f, "critical"),
        }
    }
}

/// Audit record of one multiplier that fired, in evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedMultiplier {
    pub rule_id: String,
    pub rule_name: String,
    pub factor: f64,
}

/// Score of one hazard for one assessment. Constructed fresh per
/// invocation and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub hazard: HazardKind,
    pub location_risk: f64,
    pub vulnerability: f64,
    pub base_score: f64,
    pub applied_multipliers: Vec<AppliedMultiplier>,
    pub final_score: f64,
    pub band: RiskBand,
    pub preselected: bool,
}

pub struct RiskScorer {
    config: EngineConfig,
}

impl RiskScorer {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scores a single hazard. Rules must already be validated; see
    /// [`crate::rule::partition_valid`].
    pub fn score(
        &self,
        location: &LocationRiskProfile,
        vulnerability: &VulnerabilityProfile,
        answers: &Answers,
        rules: &[MultiplierRule],
        hazard: HazardKind,
    ) -> RiskScoreResult {
        let location_risk = location.level(hazard);
        let vulnerability_level = vulnerability.level(hazard);
        let base_score = self.config.weights.location * location_risk
            + self.config.weights.vulnerability * vulnerability_level;

        let mut applicable: Vec<&MultiplierRule> = rules
            .iter()
            .filter(|r| r.active && r.applies_to(hazard))
            .collect();
        applicable.sort_by_key(|r| r.sort_key());

        let mut final_score = base_score;
        let mut applied_multipliers = Vec::new();
        for rule in applicable {
            if rule.is_met(answers) {
                final_score *= rule.factor;
                applied_multipliers.push(AppliedMultiplier {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    factor: rule.factor,
                });
            }
        }

        // Multipliers amplify or dampen within the scale, never past it.
        final_score = final_score.clamp(LEVEL_MIN, LEVEL_MAX);

        let mut result = RiskScoreResult {
            hazard,
            location_risk,
            vulnerability: vulnerability_level,
            base_score,
            applied_multipliers,
            final_score,
            band: RiskBand::from_score(final_score),
            preselected: false,
        };
        result.preselected = is_preselected(&result, &self.config.preselection);
        result
    }

    /// Scores every hazard in the catalog, in [`HazardKind::ALL`] order.
    pub fn score_all(
        &self,
        location: &LocationRiskProfile,
        vulnerability: &VulnerabilityProfile,
        answers: &Answers,
        rules: &[MultiplierRule],
    ) -> Vec<RiskScoreResult> {
        HazardKind::ALL
            .iter()
            .map(|&hazard| self.score(location, vulnerability, answers, rules, hazard))
            .collect()
    }
}
