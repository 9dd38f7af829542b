#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::answer::Answers;
use crate::hazard::HazardKind;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Met iff the answer is truthy.
    Boolean,
    /// Met iff the numeric answer is >= `threshold`.
    Threshold,
    /// Met iff `range_min <= answer <= range_max`.
    Range,
}

/// A conditional, factor-based adjustment to a hazard's base score,
/// triggered by a business characteristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiplierRule {
    pub id: String,
    pub name: String,
    pub target_characteristic: String,
    pub condition: ConditionKind,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub range_min: Option<f64>,
    #[serde(default)]
    pub range_max: Option<f64>,
    pub factor: f64,
    pub applicable_hazards: BTreeSet<HazardKind>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub order: i64,
}

fn default_active() -> bool {
    true
}

impl MultiplierRule {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::RuleValidation("rule id is required".into()));
        }
        if !self
            .id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(Error::RuleValidation(format!(
                "rule id '{}' must be lowercase alphanumeric with hyphens",
                self.id
            )));
        }
        if self.name.is_empty() {
            return Err(Error::RuleValidation(format!(
                "rule '{}' requires a name",
                self.id
            )));
        }
        if self.target_characteristic.is_empty() {
            return Err(Error::RuleValidation(format!(
                "rule '{}' requires a target characteristic",
                self.id
            )));
        }
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(Error::RuleValidation(format!(
                "rule '{}' factor must be a positive number, got {}",
                self.id, self.factor
            )));
        }
        if self.applicable_hazards.is_empty() {
            return Err(Error::RuleValidation(format!(
                "rule '{}' must apply to at least one hazard",
                self.id
            )));
        }
        match self.condition {
            ConditionKind::Boolean => {}
            ConditionKind::Threshold => match self.threshold {
                Some(t) if t.is_finite() => {}
                _ => {
                    return Err(Error::RuleValidation(format!(
                        "rule '{}' has a threshold condition but no threshold",
                        self.id
                    )))
                }
            },
            ConditionKind::Range => match (self.range_min, self.range_max) {
                (Some(min), Some(max)) if min.is_finite() && max.is_finite() => {
                    if min > max {
                        return Err(Error::RuleValidation(format!(
                            "rule '{}' range_min {} exceeds range_max {}",
                            self.id, min, max
                        )));
                    }
                }
                _ => {
                    return Err(Error::RuleValidation(format!(
                        "rule '{}' has a range condition but incomplete bounds",
                        self.id
                    )))
                }
            },
        }
        Ok(())
    }

    pub fn applies_to(&self, hazard: HazardKind) -> bool {
        self.applicable_hazards.contains(&hazard)
    }

    /// Evaluates the rule's condition against the answers. A missing
    /// answer, or a non-numeric answer where the condition needs a
    /// number, is "not met" rather than an error.
    pub fn is_met(&self, answers: &Answers) -> bool {
        let Some(answer) = answers.get(&self.target_characteristic) else {
            return false;
        };
        match self.condition {
            ConditionKind::Boolean => answer.is_truthy(),
            ConditionKind::Threshold => match (self.threshold, answer.as_number()) {
                (Some(threshold), Some(n)) => n >= threshold,
                _ => false,
            },
            ConditionKind::Range => {
                match (self.range_min, self.range_max, answer.as_number()) {
                    (Some(min), Some(max), Some(n)) => min <= n && n <= max,
                    _ => false,
                }
            }
        }
    }

    /// Sort key for deterministic evaluation: ascending order, ties
    /// broken by rule id.
    pub fn sort_key(&self) -> (i64, &str) {
        (self.order, &self.id)
    }
}

/// Why a rule was skipped during an assessment. Reported alongside the
/// scores so operators can repair the rule set; never aborts scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDiagnostic {
    pub rule_id: String,
    pub reason: String,
}

/// A named collection of multiplier rules, typically loaded from a
/// YAML or JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    pub rules: Vec<MultiplierRule>,
}

impl RuleSet {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let set: RuleSet =
            serde_yaml::from_str(yaml).map_err(|e| Error::RuleParse(e.to_string()))?;
        Ok(set)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let set: RuleSet =
            serde_json::from_str(json).map_err(|e| Error::RuleParse(e.to_string()))?;
        Ok(set)
    }

    /// Strict validation: fails on the first malformed rule or on
    /// duplicate rule ids. Used by tooling that edits rule sets.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::RuleValidation("rule set name is required".into()));
        }
        let mut seen = BTreeSet::new();
        for rule in &self.rules {
            rule.validate()?;
            if !seen.insert(rule.id.as_str()) {
                return Err(Error::RuleValidation(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
        }
        Ok(())
    }
}

/// Splits rules into usable ones and diagnostics for the malformed
/// ones. Scoring proceeds with whatever passes; each skip is logged at
/// warning level.
pub fn partition_valid(rules: Vec<MultiplierRule>) -> (Vec<MultiplierRule>, Vec<RuleDiagnostic>) {
    let mut valid = Vec::with_capacity(rules.len());
    let mut diagnostics = Vec::new();
    for rule in rules {
        match rule.validate() {
            Ok(()) => valid.push(rule),
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(rule = %rule.id, reason = %reason, "skipping malformed multiplier rule");
                diagnostics.push(RuleDiagnostic {
                    rule_id: rule.id,
                    reason,
                });
            }
        }
    }
    (valid, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::AnswerValue;

    fn boolean_rule(id: &str, characteristic: &str, factor: f64) -> MultiplierRule {
        MultiplierRule {
            id: id.into(),
            name: id.into(),
            target_characteristic: characteristic.into(),
            condition: ConditionKind::Boolean,
            threshold: None,
            range_min: None,
            range_max: None,
            factor,
            applicable_hazards: BTreeSet::from([HazardKind::Flood]),
            active: true,
            order: 0,
        }
    }

    #[test]
    fn test_boolean_condition() {
        let rule = boolean_rule("imports-overseas", "imports_overseas", 1.3);
        let mut answers = Answers::new();
        assert!(!rule.is_met(&answers));

        answers.insert("imports_overseas".into(), AnswerValue::Bool(true));
        assert!(rule.is_met(&answers));

        answers.insert("imports_overseas".into(), AnswerValue::Bool(false));
        assert!(!rule.is_met(&answers));
    }

    #[test]
    fn test_threshold_condition() {
        let mut rule = boolean_rule("tourist-heavy", "tourist_share_pct", 1.2);
        rule.condition = ConditionKind::Threshold;
        rule.threshold = Some(50.0);

        let mut answers = Answers::new();
        answers.insert("tourist_share_pct".into(), AnswerValue::Number(49.9));
        assert!(!rule.is_met(&answers));

        answers.insert("tourist_share_pct".into(), AnswerValue::Number(50.0));
        assert!(rule.is_met(&answers));

        // Boolean answer where a number is expected: not met, no error.
        answers.insert("tourist_share_pct".into(), AnswerValue::Bool(true));
        assert!(!rule.is_met(&answers));
    }

    #[test]
    fn test_range_condition() {
        let mut rule = boolean_rule("mid-headcount", "employee_count", 0.9);
        rule.condition = ConditionKind::Range;
        rule.range_min = Some(10.0);
        rule.range_max = Some(50.0);

        let mut answers = Answers::new();
        answers.insert("employee_count".into(), AnswerValue::Number(25.0));
        assert!(rule.is_met(&answers));

        answers.insert("employee_count".into(), AnswerValue::Number(9.0));
        assert!(!rule.is_met(&answers));

        answers.insert("employee_count".into(), AnswerValue::Number(51.0));
        assert!(!rule.is_met(&answers));
    }

    #[test]
    fn test_validation_rejects_non_positive_factor() {
        let rule = boolean_rule("bad-factor", "x", 0.0);
        let err = rule.validate().unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_validation_rejects_inverted_range() {
        let mut rule = boolean_rule("inverted", "x", 1.1);
        rule.condition = ConditionKind::Range;
        rule.range_min = Some(5.0);
        rule.range_max = Some(1.0);
        let err = rule.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_validation_rejects_missing_threshold() {
        let mut rule = boolean_rule("no-threshold", "x", 1.1);
        rule.condition = ConditionKind::Threshold;
        let err = rule.validate().unwrap_err();
        assert!(err.to_string().contains("no threshold"));
    }

    #[test]
    fn test_partition_valid_skips_and_reports() {
        let good = boolean_rule("good", "x", 1.2);
        let bad = boolean_rule("bad", "x", -1.0);
        let (valid, diagnostics) = partition_valid(vec![good, bad]);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "good");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "bad");
    }

    #[test]
    fn test_rule_set_from_yaml() {
        let yaml = r#"
name: "caribbean-smb"
rules:
  - id: "imports-overseas"
    name: "Depends on imported goods"
    target_characteristic: "imports_overseas"
    condition: boolean
    factor: 1.3
    applicable_hazards: [flood, hurricane, supply_chain]
  - id: "tourist-heavy"
    name: "Tourist-dependent revenue"
    target_characteristic: "tourist_share_pct"
    condition: threshold
    threshold: 50
    factor: 1.2
    applicable_hazards: [hurricane]
    order: 10
"#;
        let set = RuleSet::from_yaml(yaml).unwrap();
        set.validate().unwrap();
        assert_eq!(set.rules.len(), 2);
        assert!(set.rules[0].active);
        assert!(set.rules[1].applies_to(HazardKind::Hurricane));
        assert!(!set.rules[1].applies_to(HazardKind::Flood));
    }

    #[test]
    fn test_rule_set_rejects_duplicate_ids() {
        let set = RuleSet {
            name: "dupes".into(),
            rules: vec![boolean_rule("twice", "x", 1.1), boolean_rule("twice", "y", 1.2)],
        };
        let err = set.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
