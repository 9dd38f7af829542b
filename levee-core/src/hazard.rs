#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, Result};

/// The closed set of hazard kinds the engine scores. Every assessment
/// produces exactly one score per variant, in the order of [`HazardKind::ALL`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Hurricane,
    Flood,
    Earthquake,
    Wildfire,
    Fire,
    PowerOutage,
    CyberIncident,
    SupplyChain,
    Pandemic,
    CivilUnrest,
}

impl HazardKind {
    pub const ALL: [HazardKind; 10] = [
        HazardKind::Hurricane,
        HazardKind::Flood,
        HazardKind::Earthquake,
        HazardKind::Wildfire,
        HazardKind::Fire,
        HazardKind::PowerOutage,
        HazardKind::CyberIncident,
        HazardKind::SupplyChain,
        HazardKind::Pandemic,
        HazardKind::CivilUnrest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Hurricane => "hurricane",
            HazardKind::Flood => "flood",
            HazardKind::Earthquake => "earthquake",
            HazardKind::Wildfire => "wildfire",
            HazardKind::Fire => "fire",
            HazardKind::PowerOutage => "power_outage",
            HazardKind::CyberIncident => "cyber_incident",
            HazardKind::SupplyChain => "supply_chain",
            HazardKind::Pandemic => "pandemic",
            HazardKind::CivilUnrest => "civil_unrest",
        }
    }
}

impl std::fmt::Display for HazardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardKind {
    type Err = Error;

    /// An unrecognized hazard name is a caller bug, not a data-quality
    /// issue, so it fails hard instead of degrading to a default.
    fn from_str(s: &str) -> Result<Self> {
        HazardKind::ALL
            .iter()
            .find(|h| h.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownHazard(s.to_string()))
    }
}
