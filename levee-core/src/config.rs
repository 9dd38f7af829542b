#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Weights for combining location exposure and business-type
/// vulnerability into a base score. Exposure carries more weight:
/// geography is the stronger driver of realized risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub location: f64,
    pub vulnerability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            location: 0.6,
            vulnerability: 0.4,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [("location", self.location), ("vulnerability", self.vulnerability)] {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(Error::Config(format!(
                    "{name} weight must be between 0 and 1, got {w}"
                )));
            }
        }
        if (self.location + self.vulnerability - 1.0).abs() > 1e-9 {
            return Err(Error::Config(format!(
                "weights must sum to 1, got {}",
                self.location + self.vulnerability
            )));
        }
        Ok(())
    }
}

/// Decision rule for flagging a hazard as worth mitigating. A hazard
/// is preselected when its final score crosses `score_threshold` OR
/// its raw location exposure crosses `location_risk_threshold` — a
/// locally severe hazard deserves attention even when the business
/// type is barely susceptible to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PreselectionPolicy {
    pub score_threshold: f64,
    pub location_risk_threshold: f64,
}

impl Default for PreselectionPolicy {
    fn default() -> Self {
        Self {
            score_threshold: 6.0,
            location_risk_threshold: 5.0,
        }
    }
}

impl PreselectionPolicy {
    pub fn validate(&self) -> Result<()> {
        for (name, t) in [
            ("score_threshold", self.score_threshold),
            ("location_risk_threshold", self.location_risk_threshold),
        ] {
            if !t.is_finite() || !(0.0..=10.0).contains(&t) {
                return Err(Error::Config(format!(
                    "{name} must be between 0 and 10, got {t}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub preselection: PreselectionPolicy,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.preselection.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.weights.location, 0.6);
        assert_eq!(config.preselection.score_threshold, 6.0);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = ScoreWeights {
            location: 0.7,
            vulnerability: 0.4,
        };
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn test_threshold_out_of_scale_rejected() {
        let policy = PreselectionPolicy {
            score_threshold: 12.0,
            location_risk_threshold: 5.0,
        };
        assert!(policy.validate().is_err());
    }
}
