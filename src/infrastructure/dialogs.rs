//! Dialogs for running without a user
//!
//! Every question is answered with the choice a player would most often
//! make: rests go ahead and spend resolve, spells are cast at their own
//! level, forms are submitted unchanged. Untrained rolls are declined, as
//! the interactive prompt defaults to "No".

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::outbound::{
    DialogPort, DroneRepairChoice, ShortRestChoice, SkillForm, SkillFormOutcome, SpellCastChoice,
};
use crate::domain::entities::{Actor, Item, Skill};

#[derive(Debug, Clone, Default)]
pub struct HeadlessDialogs {
    /// Answer drone repairs as if the owner had Improved Drone Repair
    pub improved_drone_repair: bool,
}

#[async_trait]
impl DialogPort for HeadlessDialogs {
    async fn short_rest(&self, actor: &Actor) -> Result<Option<ShortRestChoice>> {
        debug!(actor_id = %actor.id, "Short rest accepted");
        Ok(Some(ShortRestChoice {
            restore_stamina: true,
        }))
    }

    async fn confirm_long_rest(&self, actor: &Actor) -> Result<bool> {
        debug!(actor_id = %actor.id, "Long rest accepted");
        Ok(true)
    }

    async fn drone_repair(&self, actor: &Actor) -> Result<Option<DroneRepairChoice>> {
        debug!(actor_id = %actor.id, "Drone repair accepted");
        Ok(Some(DroneRepairChoice {
            improved_repair: self.improved_drone_repair,
        }))
    }

    async fn spell_cast(&self, _actor: &Actor, spell: &Item) -> Result<Option<SpellCastChoice>> {
        Ok(Some(SpellCastChoice {
            level: spell.spell_level(),
            consume_slot: true,
        }))
    }

    async fn skill_form(
        &self,
        _actor: &Actor,
        _skill_id: &str,
        skill: &Skill,
        _is_new: bool,
    ) -> Result<Option<SkillFormOutcome>> {
        Ok(Some(SkillFormOutcome::Save(SkillForm {
            ability: skill.ability.clone(),
            ranks: skill.ranks,
            misc: skill.misc,
            is_class_skill: skill.value > 0,
            is_trained_only: skill.is_trained_only,
            has_armor_check_penalty: skill.has_armor_check_penalty,
            subname: skill.subname.clone(),
            enabled: skill.enabled,
        })))
    }

    async fn npc_skill_toggle(&self, actor: &Actor) -> Result<Option<BTreeMap<String, bool>>> {
        Ok(Some(
            actor
                .data
                .skills
                .iter()
                .map(|(skill_id, skill)| (skill_id.clone(), skill.enabled.unwrap_or(false)))
                .collect(),
        ))
    }

    async fn confirm_untrained_roll(&self, actor: &Actor, skill_id: &str) -> Result<bool> {
        debug!(actor_id = %actor.id, skill_id, "Untrained roll declined");
        Ok(false)
    }
}
