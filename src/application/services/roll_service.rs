//! Roll Service - ability checks, saves, skill checks and spell casting
//!
//! Every roll gets a fresh roll context: the rolling actor under `main`,
//! plus crew contexts when the actor is a starship.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, instrument};

use crate::application::ports::outbound::{
    ActorRepositoryPort, D20RollRequest, DiceRollerPort, DialogPort, RollResult,
};
use crate::application::services::actor_service::load_actor;
use crate::application::services::crew_service::CrewService;
use crate::application::services::errors::ActorOperationError;
use crate::domain::aggregates::RollContext;
use crate::domain::entities::Actor;
use crate::domain::value_objects::{
    rule_system, ActorId, CrewRole, EntityPatch, ItemId, ItemType, RollData,
};

const MAIN_CONTEXT: &str = "main";

/// Roll service
pub struct RollService {
    store: Arc<dyn ActorRepositoryPort>,
    roller: Arc<dyn DiceRollerPort>,
    dialogs: Arc<dyn DialogPort>,
    crew: Arc<CrewService>,
}

impl RollService {
    pub fn new(
        store: Arc<dyn ActorRepositoryPort>,
        roller: Arc<dyn DiceRollerPort>,
        dialogs: Arc<dyn DialogPort>,
        crew: Arc<CrewService>,
    ) -> Self {
        Self {
            store,
            roller,
            dialogs,
            crew,
        }
    }

    /// Roll an ability check
    #[instrument(skip(self))]
    pub async fn roll_ability(
        &self,
        actor_id: &ActorId,
        ability_id: &str,
    ) -> Result<Option<RollResult>, ActorOperationError> {
        let label = rule_system::ability_label(ability_id)
            .ok_or_else(|| ActorOperationError::UnknownAbility(ability_id.to_string()))?;
        let actor = Arc::new(load_actor(self.store.as_ref(), actor_id).await?);

        let mut data = actor.roll_data();
        let mut parts = Vec::new();
        let bonus = actor
            .data
            .abilities
            .get(ability_id)
            .map_or(0, |ability| ability.ability_check_bonus);
        if bonus != 0 {
            parts.push("@abilityCheckBonus".to_string());
            data.insert("abilityCheckBonus", bonus);
        }
        parts.push(format!("@abilities.{}.mod", ability_id));

        let title = format!("Ability Check - {}", label);
        self.d20(&actor, data, parts, title).await
    }

    /// Roll a saving throw
    #[instrument(skip(self))]
    pub async fn roll_save(
        &self,
        actor_id: &ActorId,
        save_id: &str,
    ) -> Result<Option<RollResult>, ActorOperationError> {
        let label = rule_system::save_label(save_id)
            .ok_or_else(|| ActorOperationError::UnknownSave(save_id.to_string()))?;
        let actor = Arc::new(load_actor(self.store.as_ref(), actor_id).await?);

        let data = actor.roll_data();
        let parts = vec![format!("@attributes.{}.bonus", save_id)];
        let title = format!("Save - {}", label);
        self.d20(&actor, data, parts, title).await
    }

    /// Roll a skill, asking first when a player rolls a trained-only skill
    /// they have no ranks in
    #[instrument(skip(self))]
    pub async fn roll_skill(
        &self,
        actor_id: &ActorId,
        skill_id: &str,
    ) -> Result<Option<RollResult>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let skill = actor
            .data
            .skills
            .get(skill_id)
            .ok_or_else(|| ActorOperationError::UnknownSkill(skill_id.to_string()))?;

        if actor.has_player_owner && skill.is_trained_only && skill.ranks <= 0 {
            let confirmed = self
                .dialogs
                .confirm_untrained_roll(&actor, skill_id)
                .await
                .context("Untrained roll dialog failed")?;
            if !confirmed {
                debug!(actor_id = %actor_id, skill_id, "Untrained roll declined");
                return Ok(None);
            }
        }

        self.skill_check(Arc::new(actor), skill_id).await
    }

    /// Roll a skill check without any confirmation
    #[instrument(skip(self))]
    pub async fn roll_skill_check(
        &self,
        actor_id: &ActorId,
        skill_id: &str,
    ) -> Result<Option<RollResult>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        if !actor.data.skills.contains_key(skill_id) {
            return Err(ActorOperationError::UnknownSkill(skill_id.to_string()));
        }
        self.skill_check(Arc::new(actor), skill_id).await
    }

    /// Cast a spell, spending a slot when it uses one
    ///
    /// Cantrips and spells outside slot preparation roll straight away. With
    /// `configure_dialog` the caster may pick another level or keep the slot.
    #[instrument(skip(self))]
    pub async fn use_spell(
        &self,
        actor_id: &ActorId,
        item_id: &ItemId,
        configure_dialog: bool,
    ) -> Result<Option<RollResult>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let mut spell = actor
            .item(item_id)
            .cloned()
            .ok_or_else(|| ActorOperationError::ItemNotFound {
                actor_id: actor_id.clone(),
                item_id: item_id.clone(),
            })?;
        if spell.item_type != ItemType::Spell {
            return Err(ActorOperationError::WrongItemType {
                item_id: item_id.clone(),
                expected: ItemType::Spell,
                actual: spell.item_type,
            });
        }

        if !spell.uses_spell_slots() {
            return Ok(self
                .roller
                .item_roll(&actor, &spell)
                .await
                .context("Failed to roll spell")?);
        }

        let mut level = spell.spell_level();
        let mut consume = true;
        if configure_dialog {
            let Some(choice) = self
                .dialogs
                .spell_cast(&actor, &spell)
                .await
                .context("Spell cast dialog failed")?
            else {
                debug!(actor_id = %actor_id, item_id = %item_id, "Spell cast cancelled");
                return Ok(None);
            };
            level = choice.level;
            consume = choice.consume_slot;
            spell.data.level = Some(level);
        }

        if consume && level > 0 {
            let slot = format!("spell{}", level);
            let remaining = actor
                .data
                .spells
                .get(&slot)
                .map_or(0, |slots| (slots.value - 1).max(0));
            let patch = EntityPatch::new().with(format!("data.spells.{}.value", slot), remaining);
            self.store
                .update(actor_id, &patch)
                .await
                .context("Failed to spend spell slot")?;
        }

        Ok(self
            .roller
            .item_roll(&actor, &spell)
            .await
            .context("Failed to roll spell")?)
    }

    async fn skill_check(
        &self,
        actor: Arc<Actor>,
        skill_id: &str,
    ) -> Result<Option<RollResult>, ActorOperationError> {
        let label = rule_system::skill_label(skill_id).unwrap_or(skill_id);
        let data = actor.roll_data();
        let parts = vec![format!("@skills.{}.mod", skill_id)];
        let title = format!("Skill Check - {}", label);
        self.d20(&actor, data, parts, title).await
    }

    /// Build the roll context for `actor`
    ///
    /// Each role in `desired_selectors` also gets a selector naming every
    /// context filled from that role.
    pub async fn roll_context(
        &self,
        actor: &Arc<Actor>,
        data: RollData,
        desired_selectors: &[CrewRole],
    ) -> Result<RollContext, ActorOperationError> {
        let mut context = RollContext::new();
        context.add_context(MAIN_CONTEXT, Arc::clone(actor), Some(data));
        context.set_main_context(MAIN_CONTEXT)?;
        self.crew
            .setup_roll_contexts(&mut context, actor, desired_selectors)
            .await?;
        Ok(context)
    }

    async fn d20(
        &self,
        actor: &Arc<Actor>,
        data: RollData,
        parts: Vec<String>,
        title: String,
    ) -> Result<Option<RollResult>, ActorOperationError> {
        let context = self.roll_context(actor, data, &[]).await?;
        let request =
            D20RollRequest::new(parts, context, title.clone(), actor.id.clone()).with_flavor(title);
        Ok(self
            .roller
            .d20_roll(request)
            .await
            .context("Failed to roll d20 check")?)
    }
}
