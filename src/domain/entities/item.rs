//! Item entity - equipment, abilities and other content owned by an actor

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::Modifier;
use crate::domain::value_objects::{ItemId, ItemType};

/// An item embedded in an actor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub data: ItemData,
    /// Host fields the rules do not read, kept for roll data and write-back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Type-specific item fields; only the ones an item's type uses are present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<Modifier>>,
    /// Ids of items stored inside or installed into this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<ItemUses>,

    // Weapons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficient: Option<bool>,

    // Spells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<Preparation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepared: Option<bool>,

    // Classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_ranks: Option<SkillRanks>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_caster: bool,
    /// Host fields the rules do not read, kept for roll data and write-back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    /// Empty for passive abilities
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Limited uses and when they come back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUses {
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub max: i32,
    #[serde(default)]
    pub per: RechargePeriod,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RechargePeriod {
    #[serde(rename = "sr")]
    ShortRest,
    #[serde(rename = "lr")]
    LongRest,
    #[serde(rename = "day")]
    Day,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preparation {
    /// Empty when the spell is cast from spell slots
    #[serde(default)]
    pub mode: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRanks {
    #[serde(default)]
    pub value: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            item_type,
            data: ItemData::default(),
            extra: Map::new(),
        }
    }

    pub fn equipped(mut self, equipped: bool) -> Self {
        self.data.equipped = Some(equipped);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.data.modifiers.get_or_insert_with(Vec::new).push(modifier);
        self
    }

    pub fn containing(mut self, item_id: ItemId) -> Self {
        self.data.contents.push(item_id);
        self
    }

    /// Modifiers on this item; a missing list reads as empty
    pub fn modifiers(&self) -> &[Modifier] {
        self.data.modifiers.as_deref().unwrap_or(&[])
    }

    pub fn is_equipped(&self) -> bool {
        self.data.equipped == Some(true)
    }

    /// True unless the item says outright that it is not equipped
    pub fn is_not_unequipped(&self) -> bool {
        self.data.equipped != Some(false)
    }

    /// Passive abilities have no activation type
    pub fn is_passive(&self) -> bool {
        self.data
            .activation
            .as_ref()
            .map_or(true, |activation| activation.kind.is_empty())
    }

    pub fn is_active(&self) -> bool {
        self.data.is_active == Some(true)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.data.contents.contains(item_id)
    }

    pub fn recharges_on(&self, periods: &[RechargePeriod]) -> bool {
        self.data
            .uses
            .as_ref()
            .is_some_and(|uses| periods.contains(&uses.per))
    }

    /// Spell level; zero for cantrips and non-spells
    pub fn spell_level(&self) -> i32 {
        self.data.level.unwrap_or(0)
    }

    /// Whether casting this spell spends a spell slot
    pub fn uses_spell_slots(&self) -> bool {
        self.spell_level() > 0
            && self
                .data
                .preparation
                .as_ref()
                .map_or(true, |preparation| preparation.mode.is_empty())
    }
}
