#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::hazard::HazardKind;
use crate::{Error, Result};

pub const LEVEL_MIN: f64 = 0.0;
pub const LEVEL_MAX: f64 = 10.0;

/// Vulnerability used when a business type has no data for a hazard.
/// Absence of data is not evidence of safety, so the default sits at
/// the scale midpoint rather than zero.
pub const DEFAULT_VULNERABILITY: f64 = 5.0;

/// Exposure used when a location has no data for a hazard.
pub const DEFAULT_LOCATION_RISK: f64 = 0.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureEntry {
    pub level: f64,
    #[serde(default)]
    pub rationale: Option<String>,
}

/// Per-location hazard exposure levels, maintained by an external data
/// collaborator and read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRiskProfile {
    pub location_id: String,
    #[serde(default)]
    pub exposure: BTreeMap<HazardKind, ExposureEntry>,
}

impl LocationRiskProfile {
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
            exposure: BTreeMap::new(),
        }
    }

    /// Empty profile for an unknown location. Every hazard resolves to
    /// the zero-exposure default.
    pub fn empty(location_id: impl Into<String>) -> Self {
        Self::new(location_id)
    }

    pub fn with_exposure(mut self, hazard: HazardKind, level: f64) -> Self {
        self.exposure.insert(
            hazard,
            ExposureEntry {
                level,
                rationale: None,
            },
        );
        self
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let profile: LocationRiskProfile =
            serde_yaml::from_str(yaml).map_err(|e| Error::ProfileParse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let profile: LocationRiskProfile =
            serde_json::from_str(json).map_err(|e| Error::ProfileParse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if self.location_id.is_empty() {
            return Err(Error::ProfileValidation("location_id is required".into()));
        }
        for (hazard, entry) in &self.exposure {
            validate_level(entry.level, &format!("exposure for {hazard}"))?;
        }
        Ok(())
    }

    /// Exposure level for a hazard, defaulting to 0 when absent.
    pub fn level(&self, hazard: HazardKind) -> f64 {
        self.exposure
            .get(&hazard)
            .map(|e| e.level)
            .unwrap_or(DEFAULT_LOCATION_RISK)
    }
}

/// Per-business-type susceptibility levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityProfile {
    pub business_type_id: String,
    #[serde(default)]
    pub vulnerability: BTreeMap<HazardKind, f64>,
}

impl VulnerabilityProfile {
    pub fn new(business_type_id: impl Into<String>) -> Self {
        Self {
            business_type_id: business_type_id.into(),
            vulnerability: BTreeMap::new(),
        }
    }

    /// Empty profile for an unknown business type. Every hazard resolves
    /// to the neutral-midpoint default.
    pub fn empty(business_type_id: impl Into<String>) -> Self {
        Self::new(business_type_id)
    }

    pub fn with_vulnerability(mut self, hazard: HazardKind, level: f64) -> Self {
        self.vulnerability.insert(hazard, level);
        self
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let profile: VulnerabilityProfile =
            serde_yaml::from_str(yaml).map_err(|e| Error::ProfileParse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let profile: VulnerabilityProfile =
            serde_json::from_str(json).map_err(|e| Error::ProfileParse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if self.business_type_id.is_empty() {
            return Err(Error::ProfileValidation(
                "business_type_id is required".into(),
            ));
        }
        for (hazard, level) in &self.vulnerability {
            validate_level(*level, &format!("vulnerability for {hazard}"))?;
        }
        Ok(())
    }

    /// Vulnerability level for a hazard, defaulting to 5 when absent.
    pub fn level(&self, hazard: HazardKind) -> f64 {
        self.vulnerability
            .get(&hazard)
            .copied()
            .unwrap_or(DEFAULT_VULNERABILITY)
    }
}

fn validate_level(level: f64, what: &str) -> Result<()> {
    if !level.is_finite() || !(LEVEL_MIN..=LEVEL_MAX).contains(&level) {
        return Err(Error::ProfileValidation(format!(
            "{what} must be between {LEVEL_MIN} and {LEVEL_MAX}, got {level}"
        )));
    }
    Ok(())
}
