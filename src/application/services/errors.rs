//! Errors shared by the actor application services

use crate::domain::aggregates::RollContextError;
use crate::domain::entities::CrewError;
use crate::domain::value_objects::{ActorId, ActorType, ItemId, ItemType, ModifierId};

#[derive(Debug, thiserror::Error)]
pub enum ActorOperationError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    #[error("Item {item_id} not found on actor {actor_id}")]
    ItemNotFound { actor_id: ActorId, item_id: ItemId },

    #[error("Item {item_id} is a {actual}, expected a {expected}")]
    WrongItemType {
        item_id: ItemId,
        expected: ItemType,
        actual: ItemType,
    },

    #[error("Modifier {0} not found")]
    ModifierNotFound(ModifierId),

    #[error("Unknown ability: {0}")]
    UnknownAbility(String),

    #[error("Unknown save: {0}")]
    UnknownSave(String),

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("{operation} is not supported for {actor_type} actors")]
    UnsupportedActorType {
        operation: &'static str,
        actor_type: ActorType,
    },

    #[error(transparent)]
    Crew(#[from] CrewError),

    #[error(transparent)]
    RollContext(#[from] RollContextError),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}
