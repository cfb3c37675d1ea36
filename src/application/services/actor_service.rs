//! Actor Service - updates, owned item creation and damage application
//!
//! Also hosts the small helpers every actor service shares: loading an
//! actor from the store and publishing events without failing the caller.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{ActorRepositoryPort, NotificationPort};
use crate::application::services::errors::ActorOperationError;
use crate::domain::entities::{Actor, Item};
use crate::domain::events::{ActorEvent, EventMetadata};
use crate::domain::value_objects::{ActorId, EntityPatch, ItemType, Size};

/// Load an actor or fail with a usage error
pub(crate) async fn load_actor(
    store: &dyn ActorRepositoryPort,
    id: &ActorId,
) -> Result<Actor, ActorOperationError> {
    store
        .get(id)
        .await
        .with_context(|| format!("Failed to load actor {}", id))?
        .ok_or_else(|| ActorOperationError::ActorNotFound(id.clone()))
}

/// Publish an event; failures are logged and swallowed
pub(crate) async fn publish_event(notifier: &dyn NotificationPort, event: ActorEvent) {
    let actor_id = event.actor_id().clone();
    if let Err(e) = notifier.publish(event).await {
        tracing::error!(actor_id = %actor_id, "Failed to publish actor event: {}", e);
    }
}

/// Resulting pools after damage or healing
#[derive(Debug, Clone, PartialEq)]
pub struct DamageOutcome {
    pub actor_id: ActorId,
    pub patch: EntityPatch,
}

/// Actor service
pub struct ActorService {
    store: Arc<dyn ActorRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl ActorService {
    pub fn new(store: Arc<dyn ActorRepositoryPort>, notifier: Arc<dyn NotificationPort>) -> Self {
        Self { store, notifier }
    }

    /// Update an actor, resizing its token when its size changes
    ///
    /// Returns the patch that was written.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        actor_id: &ActorId,
        patch: EntityPatch,
    ) -> Result<EntityPatch, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let patch = sync_token_size(&actor, patch);
        if patch.is_empty() {
            debug!(actor_id = %actor_id, "Nothing to update");
            return Ok(patch);
        }

        self.store
            .update(actor_id, &patch)
            .await
            .context("Failed to update actor")?;
        Ok(patch)
    }

    /// Give an actor a new item
    ///
    /// Actors nobody plays get their gear ready to use: weapons proficient
    /// and equipped, armor equipped, spells prepared.
    #[instrument(skip(self, item), fields(item_name = %item.name))]
    pub async fn create_item(
        &self,
        actor_id: &ActorId,
        mut item: Item,
    ) -> Result<Item, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        if !actor.has_player_owner {
            apply_unowned_defaults(&mut item);
        }

        self.store
            .create_item(actor_id, &item)
            .await
            .context("Failed to create item")?;
        info!(actor_id = %actor_id, item_id = %item.id, "Created item: {}", item.name);
        Ok(item)
    }

    /// Apply a rolled amount of damage to each actor
    ///
    /// The amount is `floor(total * multiplier)`; negative amounts heal.
    /// Starships and vehicles are skipped with a warning.
    #[instrument(skip(self))]
    pub async fn apply_damage(
        &self,
        actor_ids: &[ActorId],
        total: f64,
        multiplier: f64,
    ) -> Result<Vec<DamageOutcome>, ActorOperationError> {
        let amount = (total * multiplier).floor() as i32;
        let mut outcomes = Vec::with_capacity(actor_ids.len());

        for actor_id in actor_ids {
            let actor = load_actor(self.store.as_ref(), actor_id).await?;
            if actor.actor_type.is_crewed() {
                warn!(actor_id = %actor_id, actor_type = %actor.actor_type, "Cannot apply damage");
                publish_event(
                    self.notifier.as_ref(),
                    ActorEvent::DamageSkipped {
                        metadata: EventMetadata::default(),
                        actor_id: actor_id.clone(),
                        actor_name: actor.name.clone(),
                        actor_type: actor.actor_type,
                    },
                )
                .await;
                continue;
            }

            let patch = damage_patch(&actor, amount);
            self.store
                .update(actor_id, &patch)
                .await
                .context("Failed to apply damage")?;
            outcomes.push(DamageOutcome {
                actor_id: actor_id.clone(),
                patch,
            });
        }

        Ok(outcomes)
    }
}

/// Add token dimensions to a patch that changes the actor's size
pub fn sync_token_size(actor: &Actor, mut patch: EntityPatch) -> EntityPatch {
    let Some(value) = patch.value("data.traits.size") else {
        return patch;
    };
    let size: Size = match serde_json::from_value(value.clone()) {
        Ok(size) => size,
        Err(_) => {
            debug!(actor_id = %actor.id, "Unrecognized size {}, token left alone", value);
            return patch;
        }
    };

    if size != actor.data.traits.size && !patch.contains("token.width") {
        let squares = size.token_size();
        patch
            .set("token.height", squares)
            .set("token.width", squares);
    }
    patch
}

fn apply_unowned_defaults(item: &mut Item) {
    match item.item_type {
        ItemType::Weapon => {
            item.data.proficient = Some(true);
            item.data.equipped = Some(true);
        }
        ItemType::Equipment => item.data.equipped = Some(true),
        ItemType::Spell => item.data.prepared = Some(true),
        _ => {}
    }
}

/// Temporary hit points absorb damage first, then stamina, then hit points
///
/// Healing (negative amounts) only restores hit points.
fn damage_patch(actor: &Actor, amount: i32) -> EntityPatch {
    let hp = &actor.data.attributes.hp;
    let sp = &actor.data.attributes.sp;
    let clamp = |value: i32, min: i32, max: i32| value.max(min).min(max);

    let temp_absorbed = if amount > 0 { hp.temp.min(amount) } else { 0 };
    let after_temp = amount - temp_absorbed;
    let stamina = if amount > 0 {
        clamp(sp.value - after_temp, 0, sp.max)
    } else {
        sp.value
    };
    let absorbed = if amount > 0 {
        amount - clamp(after_temp - sp.value, 0, amount)
    } else {
        0
    };
    let hit_points = clamp(hp.value - (amount - absorbed), 0, hp.max);

    EntityPatch::new()
        .with("data.attributes.hp.temp", hp.temp - temp_absorbed)
        .with("data.attributes.sp.value", stamina)
        .with("data.attributes.hp.value", hit_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::RecordingNotifier;
    use crate::domain::value_objects::ActorType;
    use crate::infrastructure::persistence::InMemoryActorStore;
    use serde_json::json;

    fn wounded(name: &str, temp: i32, stamina: i32, hit_points: i32) -> Actor {
        let mut actor = Actor::new(name, ActorType::Character);
        actor.data.attributes.hp.value = hit_points;
        actor.data.attributes.hp.max = 20;
        actor.data.attributes.hp.temp = temp;
        actor.data.attributes.sp.value = stamina;
        actor.data.attributes.sp.max = 10;
        actor
    }

    fn service(store: Arc<InMemoryActorStore>) -> (ActorService, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (ActorService::new(store, notifier.clone()), notifier)
    }

    #[test]
    fn test_damage_cascades_through_pools() {
        let actor = wounded("Navasi", 3, 5, 20);
        let patch = damage_patch(&actor, 10);
        assert_eq!(patch.value("data.attributes.hp.temp"), Some(&json!(0)));
        assert_eq!(patch.value("data.attributes.sp.value"), Some(&json!(0)));
        assert_eq!(patch.value("data.attributes.hp.value"), Some(&json!(18)));
    }

    #[test]
    fn test_small_damage_stops_at_stamina() {
        let actor = wounded("Navasi", 0, 8, 20);
        let patch = damage_patch(&actor, 5);
        assert_eq!(patch.value("data.attributes.sp.value"), Some(&json!(3)));
        assert_eq!(patch.value("data.attributes.hp.value"), Some(&json!(20)));
    }

    #[test]
    fn test_healing_only_restores_hit_points() {
        let actor = wounded("Navasi", 2, 1, 15);
        let patch = damage_patch(&actor, -10);
        assert_eq!(patch.value("data.attributes.hp.temp"), Some(&json!(2)));
        assert_eq!(patch.value("data.attributes.sp.value"), Some(&json!(1)));
        assert_eq!(patch.value("data.attributes.hp.value"), Some(&json!(20)));
    }

    #[test]
    fn test_size_change_resizes_token() {
        let actor = Actor::new("Obozaya", ActorType::Character);
        let patch = sync_token_size(&actor, EntityPatch::new().with("data.traits.size", "huge"));
        assert_eq!(patch.value("token.width"), Some(&json!(3)));
        assert_eq!(patch.value("token.height"), Some(&json!(3)));

        let explicit = EntityPatch::new()
            .with("data.traits.size", "huge")
            .with("token.width", 2);
        let patch = sync_token_size(&actor, explicit);
        assert_eq!(patch.value("token.width"), Some(&json!(2)));
        assert!(!patch.contains("token.height"));

        let unchanged = sync_token_size(&actor, EntityPatch::new().with("data.traits.size", "medium"));
        assert!(!unchanged.contains("token.width"));
    }

    #[tokio::test]
    async fn test_update_writes_token_size() {
        let actor = Actor::new("Obozaya", ActorType::Character);
        let id = actor.id.clone();
        let store = Arc::new(InMemoryActorStore::with_actors([actor]));
        let (service, _) = service(store.clone());

        service
            .update(&id, EntityPatch::new().with("data.traits.size", "large"))
            .await
            .unwrap();

        let actor = store.get(&id).await.unwrap().unwrap();
        assert_eq!(actor.data.traits.size, Size::Large);
        assert_eq!(actor.token.width, 2);
        assert_eq!(actor.token.height, 2);
    }

    #[tokio::test]
    async fn test_unowned_actor_items_are_ready_to_use() {
        let npc = Actor::new("Space Goblin", ActorType::Npc);
        let player = Actor::new("Keskodai", ActorType::Character).with_player_owner();
        let (npc_id, player_id) = (npc.id.clone(), player.id.clone());
        let store = Arc::new(InMemoryActorStore::with_actors([npc, player]));
        let (service, _) = service(store.clone());

        let weapon = service
            .create_item(&npc_id, Item::new("Junk Cannon", ItemType::Weapon))
            .await
            .unwrap();
        assert_eq!(weapon.data.proficient, Some(true));
        assert_eq!(weapon.data.equipped, Some(true));

        let spell = service
            .create_item(&npc_id, Item::new("Magic Missile", ItemType::Spell))
            .await
            .unwrap();
        assert_eq!(spell.data.prepared, Some(true));

        let owned = service
            .create_item(&player_id, Item::new("Tactical Baton", ItemType::Weapon))
            .await
            .unwrap();
        assert_eq!(owned.data.equipped, None);
        assert_eq!(store.get(&npc_id).await.unwrap().unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn test_apply_damage_skips_vehicles() {
        let character = wounded("Navasi", 0, 10, 20);
        let ship = Actor::new("Sunrise Maiden", ActorType::Starship);
        let (character_id, ship_id) = (character.id.clone(), ship.id.clone());
        let store = Arc::new(InMemoryActorStore::with_actors([character, ship]));
        let (service, notifier) = service(store.clone());

        let outcomes = service
            .apply_damage(&[ship_id.clone(), character_id.clone()], 7.0, 1.5)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].actor_id, character_id);
        assert_eq!(store.get(&character_id).await.unwrap().unwrap().data.attributes.sp.value, 0);
        assert_eq!(store.get(&character_id).await.unwrap().unwrap().data.attributes.hp.value, 20);
        assert_eq!(store.write_count(), 1);

        let events = notifier.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_warning());
        assert_eq!(events[0].actor_id(), &ship_id);
    }
}
