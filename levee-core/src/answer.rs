#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single business-characteristic answer, e.g. "depends on imported
/// goods" (boolean) or "percentage of tourist customers" (numeric).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
}

impl AnswerValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            AnswerValue::Bool(b) => *b,
            AnswerValue::Number(n) => *n != 0.0,
        }
    }

    /// Numeric view. A boolean answer where a rule expects a number is
    /// `None`, which condition evaluation treats as "not met".
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Bool(_) => None,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

/// Characteristic answers supplied per invocation, keyed by
/// characteristic name. Never persisted by the engine.
pub type Answers = BTreeMap<String, AnswerValue>;
