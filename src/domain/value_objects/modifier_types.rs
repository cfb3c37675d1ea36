//! Modifier vocabulary: stacking categories, effect domains, value kinds

use serde::{Deserialize, Serialize};

/// Stacking category of a modifier
///
/// Bonuses of the same type do not stack (only the highest applies), except
/// untyped ones. Resolving that is left to derived-stat computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusType {
    Ability,
    Armor,
    Base,
    Circumstance,
    Divine,
    Enhancement,
    Insight,
    Luck,
    Morale,
    Racial,
    #[default]
    Untyped,
}

impl BonusType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ability => "Ability",
            Self::Armor => "Armor",
            Self::Base => "Base",
            Self::Circumstance => "Circumstance",
            Self::Divine => "Divine",
            Self::Enhancement => "Enhancement",
            Self::Insight => "Insight",
            Self::Luck => "Luck",
            Self::Morale => "Morale",
            Self::Racial => "Racial",
            Self::Untyped => "Untyped",
        }
    }
}

impl std::fmt::Display for BonusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Whether a modifier is a fixed number or a dice formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    #[default]
    Constant,
    Formula,
}

/// The amount a modifier adjusts by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierValue {
    /// A flat adjustment such as +2
    Constant(i32),
    /// A roll formula such as `1d4`, evaluated by the dice roller
    Formula(String),
}

impl ModifierValue {
    pub fn kind(&self) -> ModifierKind {
        match self {
            Self::Constant(_) => ModifierKind::Constant,
            Self::Formula(_) => ModifierKind::Formula,
        }
    }

    pub fn as_constant(&self) -> Option<i32> {
        match self {
            Self::Constant(v) => Some(*v),
            Self::Formula(_) => None,
        }
    }
}

impl Default for ModifierValue {
    fn default() -> Self {
        Self::Constant(0)
    }
}

impl From<i32> for ModifierValue {
    fn from(value: i32) -> Self {
        Self::Constant(value)
    }
}

impl From<&str> for ModifierValue {
    fn from(formula: &str) -> Self {
        Self::Formula(formula.to_string())
    }
}

impl std::fmt::Display for ModifierValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant(v) if *v >= 0 => write!(f, "+{}", v),
            Self::Constant(v) => write!(f, "{}", v),
            Self::Formula(formula) => write!(f, "{}", formula),
        }
    }
}

/// The game value domain a modifier applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectType {
    AbilitySkills,
    AbilityScore,
    AbilityCheck,
    AbilityChecks,
    Ac,
    Acp,
    Cmd,
    HitPoints,
    StaminaPoints,
    ResolvePoints,
    Initiative,
    MeleeAttacks,
    RangedAttacks,
    WeaponAttacks,
    WeaponDamage,
    AllSkills,
    #[default]
    Skill,
    SkillRanks,
    Save,
    Saves,
    SpellSaveDc,
    Bab,
    AllSpeeds,
    SpecificSpeed,
    #[serde(other)]
    Other,
}

/// Sheet grouping of a modifier; only `Permanent` survives a
/// temporary-ignoring collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierGroup {
    Permanent,
    Temporary,
    #[default]
    #[serde(other)]
    Misc,
}
