//! In-memory actor store backed by a JSON snapshot

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::application::ports::outbound::ActorRepositoryPort;
use crate::domain::entities::{Actor, Item};
use crate::domain::value_objects::{ActorId, EntityPatch, ItemPatch};

/// Actor store holding whole actors in memory
///
/// Patches are applied to the JSON form of an entity and read back, so a
/// patch that breaks the actor schema is rejected and leaves the actor as
/// it was.
#[derive(Default)]
pub struct InMemoryActorStore {
    actors: RwLock<HashMap<ActorId, Actor>>,
    writes: AtomicUsize,
}

impl InMemoryActorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actors(actors: impl IntoIterator<Item = Actor>) -> Self {
        let actors = actors.into_iter().map(|actor| (actor.id.clone(), actor)).collect();
        Self {
            actors: RwLock::new(actors),
            writes: AtomicUsize::new(0),
        }
    }

    /// Load a snapshot file holding a JSON array of actors
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read actor snapshot {}", path.display()))?;
        let actors: Vec<Actor> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse actor snapshot {}", path.display()))?;
        tracing::info!(count = actors.len(), "Loaded actor snapshot from {}", path.display());
        Ok(Self::with_actors(actors))
    }

    pub async fn insert(&self, actor: Actor) {
        self.actors.write().await.insert(actor.id.clone(), actor);
    }

    /// All actors, ordered by name
    pub async fn list(&self) -> Vec<Actor> {
        let mut actors: Vec<Actor> = self.actors.read().await.values().cloned().collect();
        actors.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        actors
    }

    /// Number of write calls accepted so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn patched<T: Serialize + DeserializeOwned>(entity: &T, patch: &EntityPatch) -> Result<T> {
    let mut value = serde_json::to_value(entity).context("Failed to serialize entity for patching")?;
    patch.apply_to(&mut value);
    serde_json::from_value(value).context("Patch produced an invalid entity")
}

#[async_trait]
impl ActorRepositoryPort for InMemoryActorStore {
    async fn get(&self, id: &ActorId) -> Result<Option<Actor>> {
        Ok(self.actors.read().await.get(id).cloned())
    }

    async fn update(&self, id: &ActorId, patch: &EntityPatch) -> Result<()> {
        let mut actors = self.actors.write().await;
        let actor = actors
            .get_mut(id)
            .with_context(|| format!("Actor {} not found", id))?;
        *actor = patched(&*actor, patch)?;
        self.record_write();
        tracing::debug!(actor_id = %id, fields = patch.len(), "Updated actor");
        Ok(())
    }

    async fn update_items(&self, actor_id: &ActorId, patches: &[ItemPatch]) -> Result<()> {
        let mut actors = self.actors.write().await;
        let actor = actors
            .get_mut(actor_id)
            .with_context(|| format!("Actor {} not found", actor_id))?;

        let mut items = actor.items.clone();
        for item_patch in patches {
            let item = items
                .iter_mut()
                .find(|item| item.id == item_patch.item_id)
                .with_context(|| {
                    format!("Item {} not found on actor {}", item_patch.item_id, actor_id)
                })?;
            *item = patched(&*item, &item_patch.patch)?;
        }
        actor.items = items;
        self.record_write();
        tracing::debug!(actor_id = %actor_id, items = patches.len(), "Updated items");
        Ok(())
    }

    async fn create_item(&self, actor_id: &ActorId, item: &Item) -> Result<()> {
        let mut actors = self.actors.write().await;
        let actor = actors
            .get_mut(actor_id)
            .with_context(|| format!("Actor {} not found", actor_id))?;
        actor.items.push(item.clone());
        self.record_write();
        tracing::debug!(actor_id = %actor_id, item_id = %item.id, "Created item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ItemUses, RechargePeriod};
    use crate::domain::value_objects::{ActorType, ItemType};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_applies_dotted_paths() {
        let actor = Actor::new("Navasi", ActorType::Character);
        let id = actor.id.clone();
        let store = InMemoryActorStore::with_actors([actor]);

        let patch = EntityPatch::new()
            .with("data.attributes.hp.value", 12)
            .with("data.resources.inspiration", json!({ "value": 1, "max": 3, "sr": true }));
        store.update(&id, &patch).await.unwrap();

        let actor = store.get(&id).await.unwrap().unwrap();
        assert_eq!(actor.data.attributes.hp.value, 12);
        assert_eq!(actor.data.resources["inspiration"].max, 3);
        assert!(actor.data.resources["inspiration"].sr);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_patch_leaves_actor_untouched() {
        let actor = Actor::new("Quig", ActorType::Character);
        let id = actor.id.clone();
        let store = InMemoryActorStore::with_actors([actor]);

        let patch = EntityPatch::new().with("data.attributes.hp.value", "lots");
        assert!(store.update(&id, &patch).await.is_err());
        assert_eq!(store.get(&id).await.unwrap().unwrap().data.attributes.hp.value, 0);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_item_patches_and_creation() {
        let mut charm = Item::new("Charm", ItemType::Magic);
        charm.data.uses = Some(ItemUses { value: 0, max: 2, per: RechargePeriod::Day, ..ItemUses::default() });
        let charm_id = charm.id.clone();
        let actor = Actor::new("Iseph", ActorType::Character).with_item(charm);
        let id = actor.id.clone();
        let store = InMemoryActorStore::with_actors([actor]);

        let patches = [ItemPatch::new(charm_id.clone(), EntityPatch::new().with("data.uses.value", 2))];
        store.update_items(&id, &patches).await.unwrap();
        store
            .create_item(&id, &Item::new("Spear", ItemType::Weapon))
            .await
            .unwrap();

        let actor = store.get(&id).await.unwrap().unwrap();
        assert_eq!(actor.items.len(), 2);
        assert_eq!(actor.item(&charm_id).unwrap().data.uses.as_ref().unwrap().value, 2);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_actor_is_an_error() {
        let store = InMemoryActorStore::new();
        assert!(store.get(&ActorId::new()).await.unwrap().is_none());
        assert!(store.update(&ActorId::new(), &EntityPatch::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_write_back_keeps_unrecognized_items() {
        let snapshot = json!({
            "id": "a1B2c3D4e5F6g7H8",
            "name": "Sunrise Maiden",
            "type": "starship",
            "data": {},
            "items": [{
                "id": "z9Y8x7W6v5U4t3S2",
                "name": "Deflector Shield",
                "type": "starshipShield",
                "data": { "pcu": 15, "defenseValue": 2 }
            }]
        });
        let actor: Actor = serde_json::from_value(snapshot.clone()).unwrap();
        let id = actor.id.clone();
        let store = InMemoryActorStore::with_actors([actor]);

        store
            .update(&id, &EntityPatch::new().with("name", "Ship II"))
            .await
            .unwrap();

        let actor = store.get(&id).await.unwrap().unwrap();
        assert_eq!(actor.name, "Ship II");
        let written = serde_json::to_value(&actor).unwrap();
        assert_eq!(written["items"][0]["type"], json!("starshipShield"));
        assert_eq!(written["items"][0]["data"]["pcu"], json!(15));
        assert_eq!(written["items"][0]["data"]["defenseValue"], json!(2));
        assert_eq!(written["items"][0]["id"], snapshot["items"][0]["id"]);
    }
}
