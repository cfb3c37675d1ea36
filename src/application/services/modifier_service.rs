//! Modifier Service - editing the modifiers stored on an actor
//!
//! The host stores an actor's modifiers as one list, so every change
//! rewrites `data.modifiers` in full.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::ActorRepositoryPort;
use crate::application::services::actor_service::load_actor;
use crate::application::services::errors::ActorOperationError;
use crate::domain::entities::{Modifier, ModifierDraft};
use crate::domain::value_objects::{ActorId, EntityPatch, ModifierId};

/// Modifier service
pub struct ModifierService {
    store: Arc<dyn ActorRepositoryPort>,
}

impl ModifierService {
    pub fn new(store: Arc<dyn ActorRepositoryPort>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, draft))]
    pub async fn add_modifier(
        &self,
        actor_id: &ActorId,
        draft: ModifierDraft,
    ) -> Result<Modifier, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let modifier = draft.build();
        let mut modifiers = actor.data.modifiers;
        modifiers.push(modifier.clone());

        self.write(actor_id, &modifiers).await?;
        info!(actor_id = %actor_id, modifier_id = %modifier.id, "Added modifier: {}", modifier.name);
        Ok(modifier)
    }

    /// Replace the stored modifier with the same id
    #[instrument(skip(self, modifier), fields(modifier_id = %modifier.id))]
    pub async fn update_modifier(
        &self,
        actor_id: &ActorId,
        modifier: Modifier,
    ) -> Result<(), ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let mut modifiers = actor.data.modifiers;
        let slot = modifiers
            .iter_mut()
            .find(|existing| existing.id == modifier.id)
            .ok_or_else(|| ActorOperationError::ModifierNotFound(modifier.id.clone()))?;
        *slot = modifier;

        self.write(actor_id, &modifiers).await
    }

    /// Remove a modifier; returns whether one was removed
    #[instrument(skip(self))]
    pub async fn delete_modifier(
        &self,
        actor_id: &ActorId,
        modifier_id: &ModifierId,
    ) -> Result<bool, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let before = actor.data.modifiers.len();
        let modifiers: Vec<Modifier> = actor
            .data
            .modifiers
            .into_iter()
            .filter(|modifier| &modifier.id != modifier_id)
            .collect();
        if modifiers.len() == before {
            debug!(actor_id = %actor_id, modifier_id = %modifier_id, "No such modifier to delete");
            return Ok(false);
        }

        self.write(actor_id, &modifiers).await?;
        Ok(true)
    }

    async fn write(&self, actor_id: &ActorId, modifiers: &[Modifier]) -> Result<(), ActorOperationError> {
        let value = serde_json::to_value(modifiers).context("Failed to serialize modifiers")?;
        let patch = EntityPatch::new().with("data.modifiers", value);
        self.store
            .update(actor_id, &patch)
            .await
            .context("Failed to write modifiers")?;
        Ok(())
    }
}
