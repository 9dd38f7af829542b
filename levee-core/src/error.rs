#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown hazard kind: {0}")]
    UnknownHazard(String),

    #[error("rule validation error: {0}")]
    RuleValidation(String),

    #[error("rule parse error: {0}")]
    RuleParse(String),

    #[error("strategy catalog validation error: {0}")]
    CatalogValidation(String),

    #[error("catalog parse error: {0}")]
    CatalogParse(String),

    #[error("profile validation error: {0}")]
    ProfileValidation(String),

    #[error("profile parse error: {0}")]
    ProfileParse(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
