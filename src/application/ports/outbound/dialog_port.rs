//! Dialog port - Questions the engine asks the user
//!
//! Every method returns `None` or `false` when the user cancels. Callers
//! abort the operation without touching the store in that case.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Actor, Item, Skill};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortRestChoice {
    /// Spend a Resolve Point to regain all Stamina Points
    pub restore_stamina: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneRepairChoice {
    /// The owner has the Improved Drone Repair feat
    pub improved_repair: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCastChoice {
    /// Level the spell is cast at
    pub level: i32,
    /// Spend a spell slot of that level
    pub consume_slot: bool,
}

/// Values entered on the skill edit form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillForm {
    pub ability: String,
    pub ranks: i32,
    pub misc: i32,
    pub is_class_skill: bool,
    pub is_trained_only: bool,
    pub has_armor_check_penalty: bool,
    pub subname: Option<String>,
    /// Only stored for NPCs
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillFormOutcome {
    Save(SkillForm),
    Delete,
}

/// Dialog port
#[async_trait]
pub trait DialogPort: Send + Sync {
    async fn short_rest(&self, actor: &Actor) -> Result<Option<ShortRestChoice>>;

    async fn confirm_long_rest(&self, actor: &Actor) -> Result<bool>;

    async fn drone_repair(&self, actor: &Actor) -> Result<Option<DroneRepairChoice>>;

    async fn spell_cast(&self, actor: &Actor, spell: &Item) -> Result<Option<SpellCastChoice>>;

    /// Edit a skill; `is_new` is set while the skill is being created
    async fn skill_form(
        &self,
        actor: &Actor,
        skill_id: &str,
        skill: &Skill,
        is_new: bool,
    ) -> Result<Option<SkillFormOutcome>>;

    /// Pick which skills an NPC shows; returns the enabled flag per skill id
    async fn npc_skill_toggle(&self, actor: &Actor) -> Result<Option<BTreeMap<String, bool>>>;

    /// Ask before rolling a trained-only skill without ranks
    async fn confirm_untrained_roll(&self, actor: &Actor, skill_id: &str) -> Result<bool>;
}
