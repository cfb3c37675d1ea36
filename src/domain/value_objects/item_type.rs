//! Item type tags and the modifier eligibility rule each one carries

use serde::{Deserialize, Serialize};

/// The kind of an item owned by an actor
///
/// Tags the rules do not know are kept verbatim in `Unknown` so they are
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    Weapon,
    Equipment,
    Shield,
    Race,
    Class,
    Chassis,
    Theme,
    Mod,
    Upgrade,
    Asi,
    Fusion,
    WeaponAccessory,
    Augmentation,
    Feat,
    StarshipFrame,
    Spell,
    Goods,
    Consumable,
    Container,
    Technological,
    Magic,
    Hybrid,
    Ammunition,
    Unknown(String),
}

/// When an item's modifiers count towards its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierEligibility {
    /// Counts unless the item is explicitly unequipped
    UnlessUnequipped,
    /// Counts only while equipped; suppressed when equipment is ignored
    WhenEquipped,
    /// Counts only while installed in an equipped item of the given type;
    /// suppressed when equipment is ignored
    InstalledIn(ItemType),
    /// Counts for passive abilities, or activated ones that are switched on
    WhenPassiveOrActive,
    /// Always counts
    Always,
    /// Never counts
    Never,
}

impl ItemType {
    /// The rule deciding whether modifiers on an item of this type apply
    pub fn modifier_eligibility(&self) -> ModifierEligibility {
        match self {
            Self::Equipment | Self::Shield | Self::Weapon => ModifierEligibility::WhenEquipped,
            Self::Upgrade => ModifierEligibility::InstalledIn(Self::Equipment),
            Self::Fusion | Self::WeaponAccessory => ModifierEligibility::InstalledIn(Self::Weapon),
            Self::Augmentation => ModifierEligibility::Always,
            Self::Feat => ModifierEligibility::WhenPassiveOrActive,
            Self::Unknown(_) => ModifierEligibility::Never,
            _ => ModifierEligibility::UnlessUnequipped,
        }
    }

    /// Parse a host type tag; `frame` is the older name of `starshipFrame`
    pub fn from_key(key: &str) -> Self {
        match key {
            "weapon" => Self::Weapon,
            "equipment" => Self::Equipment,
            "shield" => Self::Shield,
            "race" => Self::Race,
            "class" => Self::Class,
            "chassis" => Self::Chassis,
            "theme" => Self::Theme,
            "mod" => Self::Mod,
            "upgrade" => Self::Upgrade,
            "asi" => Self::Asi,
            "fusion" => Self::Fusion,
            "weaponAccessory" => Self::WeaponAccessory,
            "augmentation" => Self::Augmentation,
            "feat" => Self::Feat,
            "starshipFrame" | "frame" => Self::StarshipFrame,
            "spell" => Self::Spell,
            "goods" => Self::Goods,
            "consumable" => Self::Consumable,
            "container" => Self::Container,
            "technological" => Self::Technological,
            "magic" => Self::Magic,
            "hybrid" => Self::Hybrid,
            "ammunition" => Self::Ammunition,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Weapon => "weapon",
            Self::Equipment => "equipment",
            Self::Shield => "shield",
            Self::Race => "race",
            Self::Class => "class",
            Self::Chassis => "chassis",
            Self::Theme => "theme",
            Self::Mod => "mod",
            Self::Upgrade => "upgrade",
            Self::Asi => "asi",
            Self::Fusion => "fusion",
            Self::WeaponAccessory => "weaponAccessory",
            Self::Augmentation => "augmentation",
            Self::Feat => "feat",
            Self::StarshipFrame => "starshipFrame",
            Self::Spell => "spell",
            Self::Goods => "goods",
            Self::Consumable => "consumable",
            Self::Container => "container",
            Self::Technological => "technological",
            Self::Magic => "magic",
            Self::Hybrid => "hybrid",
            Self::Ammunition => "ammunition",
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<String> for ItemType {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<ItemType> for String {
    fn from(item_type: ItemType) -> Self {
        item_type.as_str().to_string()
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
