//! Repository port - Interface to the host's actor store
//!
//! The host owns persistence. Services read whole actors and write back
//! dotted-path patches, the same shape the host's own update calls take.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{Actor, Item};
use crate::domain::value_objects::{ActorId, EntityPatch, ItemPatch};

/// Repository port for Actor operations
#[async_trait]
pub trait ActorRepositoryPort: Send + Sync {
    /// Get an actor with its items
    async fn get(&self, id: &ActorId) -> Result<Option<Actor>>;

    /// Apply a patch to an actor
    async fn update(&self, id: &ActorId, patch: &EntityPatch) -> Result<()>;

    /// Apply patches to several items owned by an actor
    async fn update_items(&self, actor_id: &ActorId, patches: &[ItemPatch]) -> Result<()>;

    /// Add an item to an actor
    async fn create_item(&self, actor_id: &ActorId, item: &Item) -> Result<()>;
}
