//! Actor entity - characters, NPCs, drones, starships and vehicles

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::{Item, Modifier};
use crate::domain::value_objects::{
    ActorId, ActorType, CrewRole, ItemId, ItemType, RollData, Size,
};

/// A game entity owning attributes, skills and items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    #[serde(rename = "type")]
    pub actor_type: ActorType,
    #[serde(default)]
    pub has_player_owner: bool,
    #[serde(default)]
    pub data: ActorData,
    #[serde(default)]
    pub token: TokenSettings,
    #[serde(default)]
    pub flags: ActorFlags,
    /// Owned items in stored order
    #[serde(default)]
    pub items: Vec<Item>,
    /// Host fields the rules do not read, kept for roll data and write-back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Rules data of an actor; this tree is also the base of its roll data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActorData {
    pub abilities: BTreeMap<String, Ability>,
    pub skills: BTreeMap<String, Skill>,
    pub attributes: Attributes,
    pub details: Details,
    pub resources: BTreeMap<String, ActorResource>,
    pub spells: BTreeMap<String, SpellSlots>,
    pub modifiers: Vec<Modifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew: Option<BTreeMap<CrewRole, CrewStation>>,
    pub traits: Traits,
    /// Host fields the rules do not read, kept for roll data and write-back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ability {
    pub value: i32,
    #[serde(rename = "mod")]
    pub modifier: i32,
    pub damage: i32,
    pub ability_check_bonus: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub ability: String,
    pub ranks: i32,
    /// Class skill bonus, 0 or 3
    pub value: i32,
    pub misc: i32,
    #[serde(rename = "mod")]
    pub modifier: i32,
    pub is_trained_only: bool,
    pub has_armor_check_penalty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subname: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub hp: HitPoints,
    pub sp: Pool,
    pub rp: Pool,
    pub fort: SaveBonus,
    pub reflex: SaveBonus,
    pub will: SaveBonus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attributes {
    pub fn save(&self, save_id: &str) -> Option<&SaveBonus> {
        match save_id {
            "fort" => Some(&self.fort),
            "reflex" => Some(&self.reflex),
            "will" => Some(&self.will),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitPoints {
    pub value: i32,
    pub max: i32,
    pub temp: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stamina or resolve points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
    pub value: i32,
    pub max: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveBonus {
    pub bonus: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Details {
    pub level: Level,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub value: i32,
}

/// A class resource such as a pool of daily points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorResource {
    pub value: i32,
    pub max: i32,
    /// Refills on a short rest
    pub sr: bool,
    /// Refills on a long rest
    pub lr: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellSlots {
    pub value: i32,
    pub max: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Occupants of one crew station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrewStation {
    pub actor_ids: Vec<ActorId>,
    /// Maximum occupants, -1 for no limit
    pub limit: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CrewStation {
    fn default() -> Self {
        Self {
            actor_ids: Vec::new(),
            limit: -1,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Traits {
    pub size: Size,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorFlags {
    pub sfrpg: SystemFlags,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew_member: Option<CrewMembership>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which ship an actor serves on, and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMembership {
    pub ship_id: ActorId,
    pub role: CrewRole,
}

/// Errors raised by crew queries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrewError {
    #[error("{operation} is not supported on actor {actor_id} of type {actor_type}")]
    UnsupportedActorType {
        operation: &'static str,
        actor_id: ActorId,
        actor_type: ActorType,
    },
}

impl Actor {
    pub fn new(name: impl Into<String>, actor_type: ActorType) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            actor_type,
            has_player_owner: false,
            data: ActorData::default(),
            token: TokenSettings::default(),
            flags: ActorFlags::default(),
            items: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.data.modifiers.push(modifier);
        self
    }

    pub fn with_player_owner(mut self) -> Self {
        self.has_player_owner = true;
        self
    }

    /// Seat an actor at a crew station
    pub fn with_crew(mut self, role: CrewRole, actor_id: ActorId) -> Self {
        self.data
            .crew
            .get_or_insert_with(BTreeMap::new)
            .entry(role)
            .or_default()
            .actor_ids
            .push(actor_id);
        self
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn items_of_type(&self, item_type: ItemType) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.item_type == item_type)
    }

    /// The item holding `item_id` in its contents
    ///
    /// An item claimed by several containers is malformed data; the first
    /// claimant in stored order wins.
    pub fn container_of(&self, item_id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.contains(item_id))
    }

    /// Snapshot of this actor's roll data
    pub fn roll_data(&self) -> RollData {
        crate::domain::services::actor_roll_data(self)
    }

    /// The station an actor occupies on this ship, if any
    pub fn crew_role_for_actor(&self, actor_id: &ActorId) -> Result<Option<CrewRole>, CrewError> {
        self.require_crewed("crew_role_for_actor")?;
        Ok(self.data.crew.as_ref().and_then(|crew| {
            crew.iter()
                .find(|(_, station)| station.actor_ids.contains(actor_id))
                .map(|(role, _)| *role)
        }))
    }

    /// The occupants of a station, if the ship has that station
    pub fn crew_station(&self, role: CrewRole) -> Result<Option<&CrewStation>, CrewError> {
        self.require_crewed("crew_station")?;
        Ok(self.data.crew.as_ref().and_then(|crew| crew.get(&role)))
    }

    fn require_crewed(&self, operation: &'static str) -> Result<(), CrewError> {
        if self.actor_type.is_crewed() {
            Ok(())
        } else {
            Err(CrewError::UnsupportedActorType {
                operation,
                actor_id: self.id.clone(),
                actor_type: self.actor_type,
            })
        }
    }

    /// First free custom skill id: `pro`, then `pro1`, `pro2`, ...
    pub fn next_skill_id(&self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut counter = 0;
        while self.data.skills.contains_key(&candidate) {
            counter += 1;
            candidate = format!("{}{}", base, counter);
        }
        candidate
    }
}
