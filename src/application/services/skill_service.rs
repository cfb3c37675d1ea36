//! Skill Service - custom skills and the NPC skill list

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use serde_json::Map;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{ActorRepositoryPort, DialogPort, SkillForm, SkillFormOutcome};
use crate::application::services::actor_service::load_actor;
use crate::application::services::errors::ActorOperationError;
use crate::domain::entities::Skill;
use crate::domain::value_objects::{ActorId, ActorType, EntityPatch, RulesSettings};

/// Base id of custom (profession) skills
const CUSTOM_SKILL_BASE: &str = "pro";

/// Skill service
pub struct SkillService {
    store: Arc<dyn ActorRepositoryPort>,
    dialogs: Arc<dyn DialogPort>,
    settings: RulesSettings,
}

impl SkillService {
    pub fn new(
        store: Arc<dyn ActorRepositoryPort>,
        dialogs: Arc<dyn DialogPort>,
        settings: RulesSettings,
    ) -> Self {
        Self {
            store,
            dialogs,
            settings,
        }
    }

    /// Add a profession skill under the first free `pro` id
    ///
    /// Returns the new skill id, or `None` when the form was cancelled.
    #[instrument(skip(self))]
    pub async fn add_skill(&self, actor_id: &ActorId) -> Result<Option<String>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let skill_id = actor.next_skill_id(CUSTOM_SKILL_BASE);
        let template = Skill {
            ability: "int".to_string(),
            subname: Some(String::new()),
            ..Skill::default()
        };

        let outcome = self
            .dialogs
            .skill_form(&actor, &skill_id, &template, true)
            .await
            .context("Skill form failed")?;
        let Some(SkillFormOutcome::Save(form)) = outcome else {
            debug!(actor_id = %actor_id, "Skill creation cancelled");
            return Ok(None);
        };

        let value = self.class_skill_value(&form);
        let skill = Skill {
            modifier: value + form.misc + form.ranks,
            value,
            ability: form.ability,
            ranks: form.ranks,
            misc: form.misc,
            is_trained_only: form.is_trained_only,
            has_armor_check_penalty: form.has_armor_check_penalty,
            enabled: Some(true),
            subname: Some(form.subname.unwrap_or_default()),
            extra: Map::new(),
        };
        let skill_value = serde_json::to_value(&skill).context("Failed to serialize skill")?;
        let patch = EntityPatch::new().with(format!("data.skills.{}", skill_id), skill_value);

        self.store
            .update(actor_id, &patch)
            .await
            .context("Failed to add skill")?;
        info!(actor_id = %actor_id, skill_id = %skill_id, "Added skill");
        Ok(Some(skill_id))
    }

    /// Edit or remove a skill
    ///
    /// Returns the patch written, or `None` when the form was cancelled.
    #[instrument(skip(self))]
    pub async fn edit_skill(
        &self,
        actor_id: &ActorId,
        skill_id: &str,
    ) -> Result<Option<EntityPatch>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let skill = actor
            .data
            .skills
            .get(skill_id)
            .ok_or_else(|| ActorOperationError::UnknownSkill(skill_id.to_string()))?;

        let outcome = self
            .dialogs
            .skill_form(&actor, skill_id, skill, false)
            .await
            .context("Skill form failed")?;

        let base = format!("data.skills.{}", skill_id);
        let mut patch = EntityPatch::new();
        match outcome {
            None => {
                debug!(actor_id = %actor_id, skill_id, "Skill edit cancelled");
                return Ok(None);
            }
            Some(SkillFormOutcome::Delete) => {
                patch.remove(base);
            }
            Some(SkillFormOutcome::Save(form)) => {
                patch
                    .set(format!("{}.ability", base), form.ability.clone())
                    .set(format!("{}.ranks", base), form.ranks)
                    .set(format!("{}.value", base), self.class_skill_value(&form))
                    .set(format!("{}.misc", base), form.misc)
                    .set(format!("{}.isTrainedOnly", base), form.is_trained_only)
                    .set(format!("{}.hasArmorCheckPenalty", base), form.has_armor_check_penalty);
                if actor.actor_type == ActorType::Npc {
                    patch.set(format!("{}.enabled", base), form.enabled.unwrap_or(false));
                }
                if skill.subname.is_some() {
                    patch.set(format!("{}.subname", base), form.subname.unwrap_or_default());
                }
            }
        }

        self.store
            .update(actor_id, &patch)
            .await
            .context("Failed to edit skill")?;
        Ok(Some(patch))
    }

    /// Choose which skills an NPC shows
    ///
    /// Skills left out of the answer that were enabled get disabled.
    #[instrument(skip(self))]
    pub async fn toggle_npc_skills(
        &self,
        actor_id: &ActorId,
    ) -> Result<Option<EntityPatch>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let Some(chosen) = self
            .dialogs
            .npc_skill_toggle(&actor)
            .await
            .context("NPC skill dialog failed")?
        else {
            debug!(actor_id = %actor_id, "NPC skill toggle cancelled");
            return Ok(None);
        };

        let patch = npc_skill_patch(&actor.data.skills, &chosen);
        if !patch.is_empty() {
            self.store
                .update(actor_id, &patch)
                .await
                .context("Failed to toggle NPC skills")?;
        }
        Ok(Some(patch))
    }

    fn class_skill_value(&self, form: &SkillForm) -> i32 {
        if form.is_class_skill {
            self.settings.class_skill_bonus
        } else {
            0
        }
    }
}

fn npc_skill_patch(skills: &BTreeMap<String, Skill>, chosen: &BTreeMap<String, bool>) -> EntityPatch {
    let mut patch = EntityPatch::new();
    for (skill_id, skill) in skills {
        if skill.enabled == Some(true) && !chosen.contains_key(skill_id) {
            patch.set(format!("data.skills.{}.enabled", skill_id), false);
        }
    }
    for (skill_id, enabled) in chosen {
        patch.set(format!("data.skills.{}.enabled", skill_id), *enabled);
    }
    patch
}
