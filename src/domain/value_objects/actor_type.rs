//! Actor kinds and creature sizes

use serde::{Deserialize, Serialize};

/// The kind of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    #[default]
    Character,
    Npc,
    Drone,
    Starship,
    Vehicle,
}

impl ActorType {
    /// Composite actors carry a crew of other actors
    pub fn is_crewed(&self) -> bool {
        matches!(self, Self::Starship | Self::Vehicle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Npc => "npc",
            Self::Drone => "drone",
            Self::Starship => "starship",
            Self::Vehicle => "vehicle",
        }
    }
}

impl std::fmt::Display for ActorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creature size category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Fine,
    Diminutive,
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
    Colossal,
}

impl Size {
    /// Token footprint in grid squares
    pub fn token_size(&self) -> u32 {
        match self {
            Self::Fine | Self::Diminutive | Self::Tiny | Self::Small | Self::Medium => 1,
            Self::Large => 2,
            Self::Huge => 3,
            Self::Gargantuan => 4,
            Self::Colossal => 6,
        }
    }
}
