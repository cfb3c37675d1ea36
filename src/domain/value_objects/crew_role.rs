//! Starship crew stations

use serde::{Deserialize, Serialize};

/// A station on a crewed actor
///
/// Declaration order is the order stations are scanned when building roll
/// contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrewRole {
    Captain,
    Pilot,
    Gunner,
    Engineer,
    ChiefMate,
    MagicOfficer,
    Passenger,
    ScienceOfficer,
    MinorCrew,
    OpenCrew,
}

impl CrewRole {
    /// Stations that receive one context per occupant, in build order
    pub const REPEATABLE: [CrewRole; 8] = [
        Self::Gunner,
        Self::Engineer,
        Self::ChiefMate,
        Self::MagicOfficer,
        Self::Passenger,
        Self::ScienceOfficer,
        Self::MinorCrew,
        Self::OpenCrew,
    ];

    /// Context key prefix for this station
    pub fn key(&self) -> &'static str {
        match self {
            Self::Captain => "captain",
            Self::Pilot => "pilot",
            Self::Gunner => "gunner",
            Self::Engineer => "engineer",
            Self::ChiefMate => "chiefMate",
            Self::MagicOfficer => "magicOfficer",
            Self::Passenger => "passenger",
            Self::ScienceOfficer => "scienceOfficer",
            Self::MinorCrew => "minorCrew",
            Self::OpenCrew => "openCrew",
        }
    }

    /// Only the first occupant of a singleton station gets a context
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Captain | Self::Pilot)
    }

    /// Pooled stations gather occupants from across the whole crew
    pub fn is_pooled(&self) -> bool {
        matches!(self, Self::MinorCrew | Self::OpenCrew)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [Self::Captain, Self::Pilot]
            .into_iter()
            .chain(Self::REPEATABLE)
            .find(|role| role.key() == key)
    }
}

impl std::fmt::Display for CrewRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Which stations a pooled role sweeps when numbering its contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PooledCrewPolicy {
    /// Every station, including occupants already placed in named stations
    #[default]
    SweepAll,
    /// Only the pooled stations themselves
    ExcludeAssigned,
}

impl std::str::FromStr for PooledCrewPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sweep-all" | "sweep_all" => Ok(Self::SweepAll),
            "exclude-assigned" | "exclude_assigned" => Ok(Self::ExcludeAssigned),
            other => Err(format!("unknown pooled crew policy: {}", other)),
        }
    }
}
