#![forbid(unsafe_code)]

use crate::config::PreselectionPolicy;
use crate::scorer::RiskScoreResult;

/// Whether a hazard is significant enough to warrant mitigation
/// strategies. The disjunction is deliberate: chronic local exposure
/// flags a hazard even when the business type is barely susceptible
/// and the combined score stays low. Pure and total.
pub fn is_preselected(result: &RiskScoreResult, policy: &PreselectionPolicy) -> bool {
    result.final_score >= policy.score_threshold
        || result.location_risk >= policy.location_risk_threshold
}
