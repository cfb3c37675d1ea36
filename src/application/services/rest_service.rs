//! Rest Service - short rests, long rests and drone repair
//!
//! Each operation computes one actor patch plus item patches for limited
//! uses, writes them, and optionally announces the result in chat.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{ActorRepositoryPort, DialogPort, NotificationPort};
use crate::application::services::actor_service::{load_actor, publish_event};
use crate::application::services::errors::ActorOperationError;
use crate::domain::entities::{Actor, RechargePeriod};
use crate::domain::events::{ActorEvent, EventMetadata};
use crate::domain::value_objects::{ActorId, EntityPatch, ItemPatch, RulesSettings};

/// Switches shared by rest operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestOptions {
    /// Ask the user first
    pub dialog: bool,
    /// Announce the result
    pub chat: bool,
}

impl Default for RestOptions {
    fn default() -> Self {
        Self {
            dialog: true,
            chat: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortRestOutcome {
    pub resolve_spent: i32,
    pub stamina_regained: i32,
    pub actor_patch: EntityPatch,
    pub item_patches: Vec<ItemPatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongRestOutcome {
    pub hit_points_regained: i32,
    pub stamina_regained: i32,
    pub resolve_regained: i32,
    pub actor_patch: EntityPatch,
    pub item_patches: Vec<ItemPatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroneRepairOutcome {
    pub hit_points_repaired: i32,
    pub actor_patch: EntityPatch,
}

/// Rest service
pub struct RestService {
    store: Arc<dyn ActorRepositoryPort>,
    dialogs: Arc<dyn DialogPort>,
    notifier: Arc<dyn NotificationPort>,
    settings: RulesSettings,
}

impl RestService {
    pub fn new(
        store: Arc<dyn ActorRepositoryPort>,
        dialogs: Arc<dyn DialogPort>,
        notifier: Arc<dyn NotificationPort>,
        settings: RulesSettings,
    ) -> Self {
        Self {
            store,
            dialogs,
            notifier,
            settings,
        }
    }

    /// Take a 10 minute rest
    ///
    /// Spending a Resolve Point restores all Stamina Points, but only when
    /// the actor has resolve to spend and stamina to regain.
    #[instrument(skip(self))]
    pub async fn short_rest(
        &self,
        actor_id: &ActorId,
        options: RestOptions,
    ) -> Result<Option<ShortRestOutcome>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let sp = &actor.data.attributes.sp;
        let rp = &actor.data.attributes.rp;
        let can_restore_stamina = rp.value > 0 && sp.value < sp.max;

        let mut restore_stamina = false;
        if options.dialog {
            let Some(choice) = self
                .dialogs
                .short_rest(&actor)
                .await
                .context("Short rest dialog failed")?
            else {
                debug!(actor_id = %actor_id, "Short rest cancelled");
                return Ok(None);
            };
            restore_stamina = choice.restore_stamina;
        }

        let mut patch = EntityPatch::new();
        let (mut resolve_spent, mut stamina_regained) = (0, 0);
        if restore_stamina && can_restore_stamina {
            resolve_spent = 1;
            stamina_regained = sp.max - sp.value;
            patch
                .set("data.attributes.sp.value", sp.max)
                .set("data.attributes.rp.value", (rp.value - resolve_spent).max(0));
        }

        for (key, resource) in &actor.data.resources {
            if resource.max != 0 && resource.sr {
                patch.set(format!("data.resources.{}.value", key), resource.max);
            }
        }

        let item_patches = recharge_patches(&actor, &[RechargePeriod::ShortRest]);
        self.write(actor_id, &patch, &item_patches).await?;

        if options.chat {
            publish_event(
                self.notifier.as_ref(),
                ActorEvent::ShortRestTaken {
                    metadata: EventMetadata::default(),
                    actor_id: actor_id.clone(),
                    actor_name: actor.name.clone(),
                    resolve_spent: resolve_spent > 0,
                    stamina_regained,
                },
            )
            .await;
        }

        info!(actor_id = %actor_id, resolve_spent, stamina_regained, "Short rest taken");
        Ok(Some(ShortRestOutcome {
            resolve_spent,
            stamina_regained,
            actor_patch: patch,
            item_patches,
        }))
    }

    /// Take a night's rest
    ///
    /// Recovers hit points equal to character level, all stamina and
    /// resolve, one point of damage on each ability, rest-based resources,
    /// spell slots and daily item uses.
    #[instrument(skip(self))]
    pub async fn long_rest(
        &self,
        actor_id: &ActorId,
        options: RestOptions,
    ) -> Result<Option<LongRestOutcome>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        if options.dialog
            && !self
                .dialogs
                .confirm_long_rest(&actor)
                .await
                .context("Long rest dialog failed")?
        {
            debug!(actor_id = %actor_id, "Long rest cancelled");
            return Ok(None);
        }

        let attributes = &actor.data.attributes;
        let level = actor.data.details.level.value;
        let hp = &attributes.hp;
        let hit_points = (hp.value + level).min(hp.max);
        let hit_points_regained = if hp.value >= hp.max {
            0
        } else {
            level.min(hp.max - hp.value)
        };
        let stamina_regained = attributes.sp.max - attributes.sp.value;
        let resolve_regained = attributes.rp.max - attributes.rp.value;

        let mut patch = EntityPatch::new();
        patch
            .set("data.attributes.hp.value", hit_points)
            .set("data.attributes.sp.value", attributes.sp.max)
            .set("data.attributes.rp.value", attributes.rp.max);

        for (key, ability) in &actor.data.abilities {
            if ability.damage > 0 {
                patch.set(format!("data.abilities.{}.damage", key), ability.damage - 1);
            }
        }
        for (key, resource) in &actor.data.resources {
            if resource.max != 0 && (resource.sr || resource.lr) {
                patch.set(format!("data.resources.{}.value", key), resource.max);
            }
        }
        for (key, slots) in &actor.data.spells {
            if slots.max != 0 {
                patch.set(format!("data.spells.{}.value", key), slots.max);
            }
        }

        let item_patches = recharge_patches(
            &actor,
            &[
                RechargePeriod::ShortRest,
                RechargePeriod::LongRest,
                RechargePeriod::Day,
            ],
        );
        self.write(actor_id, &patch, &item_patches).await?;

        if options.chat {
            publish_event(
                self.notifier.as_ref(),
                ActorEvent::LongRestTaken {
                    metadata: EventMetadata::default(),
                    actor_id: actor_id.clone(),
                    actor_name: actor.name.clone(),
                    hit_points_regained,
                    stamina_regained,
                    resolve_regained,
                },
            )
            .await;
        }

        info!(actor_id = %actor_id, hit_points_regained, "Long rest taken");
        Ok(Some(LongRestOutcome {
            hit_points_regained,
            stamina_regained,
            resolve_regained,
            actor_patch: patch,
            item_patches,
        }))
    }

    /// Repair a drone for a share of its maximum hit points
    ///
    /// A drone at full hit points is left alone and the user is told so.
    #[instrument(skip(self))]
    pub async fn repair_drone(
        &self,
        actor_id: &ActorId,
        options: RestOptions,
    ) -> Result<Option<DroneRepairOutcome>, ActorOperationError> {
        let actor = load_actor(self.store.as_ref(), actor_id).await?;
        let hp = &actor.data.attributes.hp;
        if hp.value >= hp.max {
            publish_event(
                self.notifier.as_ref(),
                ActorEvent::DroneRepairUnnecessary {
                    metadata: EventMetadata::default(),
                    actor_id: actor_id.clone(),
                    actor_name: actor.name.clone(),
                },
            )
            .await;
            return Ok(None);
        }

        let mut improved = false;
        if options.dialog {
            let Some(choice) = self
                .dialogs
                .drone_repair(&actor)
                .await
                .context("Drone repair dialog failed")?
            else {
                debug!(actor_id = %actor_id, "Drone repair cancelled");
                return Ok(None);
            };
            improved = choice.improved_repair;
        }

        let percent = if improved {
            self.settings.improved_drone_repair_percent
        } else {
            self.settings.drone_repair_percent
        };
        let repaired = (hp.value + hp.max * percent / 100).min(hp.max);
        let hit_points_repaired = repaired - hp.value;

        let patch = EntityPatch::new().with("data.attributes.hp.value", repaired);
        self.write(actor_id, &patch, &[]).await?;

        if options.chat {
            publish_event(
                self.notifier.as_ref(),
                ActorEvent::DroneRepaired {
                    metadata: EventMetadata::default(),
                    actor_id: actor_id.clone(),
                    actor_name: actor.name.clone(),
                    hit_points_repaired,
                    improved,
                },
            )
            .await;
        }

        Ok(Some(DroneRepairOutcome {
            hit_points_repaired,
            actor_patch: patch,
        }))
    }

    async fn write(
        &self,
        actor_id: &ActorId,
        patch: &EntityPatch,
        item_patches: &[ItemPatch],
    ) -> Result<(), ActorOperationError> {
        if !patch.is_empty() {
            self.store
                .update(actor_id, patch)
                .await
                .context("Failed to update actor after rest")?;
        }
        if !item_patches.is_empty() {
            self.store
                .update_items(actor_id, item_patches)
                .await
                .context("Failed to update item uses after rest")?;
        }
        Ok(())
    }
}

/// Refill limited uses on items that recharge in any of `periods`
fn recharge_patches(actor: &Actor, periods: &[RechargePeriod]) -> Vec<ItemPatch> {
    actor
        .items
        .iter()
        .filter(|item| item.recharges_on(periods))
        .filter_map(|item| {
            let uses = item.data.uses.as_ref()?;
            Some(ItemPatch::new(
                item.id.clone(),
                EntityPatch::new().with("data.uses.value", uses.max),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{DroneRepairChoice, ShortRestChoice};
    use crate::application::services::test_support::{RecordingNotifier, ScriptedDialogs};
    use crate::domain::entities::{Ability, ActorResource, Item, ItemUses, SpellSlots};
    use crate::domain::value_objects::{ActorType, ItemType};
    use crate::infrastructure::persistence::InMemoryActorStore;
    use serde_json::json;

    struct Harness {
        store: Arc<InMemoryActorStore>,
        notifier: Arc<RecordingNotifier>,
        service: RestService,
    }

    fn harness(actor: Actor, dialogs: ScriptedDialogs) -> Harness {
        let store = Arc::new(InMemoryActorStore::with_actors([actor]));
        let notifier = Arc::new(RecordingNotifier::default());
        let service = RestService::new(
            store.clone(),
            Arc::new(dialogs),
            notifier.clone(),
            RulesSettings::default(),
        );
        Harness {
            store,
            notifier,
            service,
        }
    }

    fn limited(name: &str, per: RechargePeriod) -> Item {
        let mut item = Item::new(name, ItemType::Technological);
        item.data.uses = Some(ItemUses { value: 0, max: 3, per, ..ItemUses::default() });
        item
    }

    fn adventurer() -> Actor {
        let mut actor = Actor::new("Navasi", ActorType::Character)
            .with_item(limited("Grenade Pouch", RechargePeriod::ShortRest))
            .with_item(limited("Daily Charm", RechargePeriod::Day))
            .with_item(limited("Lucky Coin", RechargePeriod::LongRest));
        let attributes = &mut actor.data.attributes;
        attributes.hp.value = 10;
        attributes.hp.max = 30;
        attributes.sp.value = 4;
        attributes.sp.max = 12;
        attributes.rp.value = 2;
        attributes.rp.max = 5;
        actor.data.details.level.value = 5;
        actor.data.resources.insert(
            "focus".to_string(),
            ActorResource { value: 0, max: 2, sr: true, lr: false, ..ActorResource::default() },
        );
        actor.data.resources.insert(
            "daily".to_string(),
            ActorResource { value: 0, max: 1, sr: false, lr: true, ..ActorResource::default() },
        );
        actor.data.abilities.insert(
            "con".to_string(),
            Ability { value: 14, modifier: 2, damage: 2, ..Ability::default() },
        );
        actor
            .data
            .spells
            .insert("spell1".to_string(), SpellSlots { value: 0, max: 4, ..SpellSlots::default() });
        actor
    }

    #[tokio::test]
    async fn test_short_rest_spends_resolve() {
        let actor = adventurer();
        let id = actor.id.clone();
        let dialogs = ScriptedDialogs {
            short_rest: Some(ShortRestChoice { restore_stamina: true }),
            ..ScriptedDialogs::default()
        };
        let h = harness(actor, dialogs);

        let outcome = h
            .service
            .short_rest(&id, RestOptions::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.resolve_spent, 1);
        assert_eq!(outcome.stamina_regained, 8);
        assert_eq!(outcome.item_patches.len(), 1);
        assert_eq!(outcome.actor_patch.value("data.resources.focus.value"), Some(&json!(2)));
        assert!(!outcome.actor_patch.contains("data.resources.daily.value"));

        let actor = h.store.get(&id).await.unwrap().unwrap();
        assert_eq!(actor.data.attributes.sp.value, 12);
        assert_eq!(actor.data.attributes.rp.value, 1);
        assert_eq!(actor.items[0].data.uses.as_ref().unwrap().value, 3);
        assert_eq!(actor.items[1].data.uses.as_ref().unwrap().value, 0);
        assert_eq!(h.notifier.events().len(), 1);
    }

    #[tokio::test]
    async fn test_short_rest_without_resolve_keeps_stamina() {
        let mut actor = adventurer();
        actor.data.attributes.rp.value = 0;
        let id = actor.id.clone();
        let dialogs = ScriptedDialogs {
            short_rest: Some(ShortRestChoice { restore_stamina: true }),
            ..ScriptedDialogs::default()
        };
        let h = harness(actor, dialogs);

        let outcome = h
            .service
            .short_rest(&id, RestOptions { dialog: true, chat: false })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.resolve_spent, 0);
        assert!(!outcome.actor_patch.contains("data.attributes.sp.value"));
        assert!(h.notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_rests_write_nothing() {
        let actor = adventurer();
        let id = actor.id.clone();
        let h = harness(actor, ScriptedDialogs::default());

        assert!(h.service.short_rest(&id, RestOptions::default()).await.unwrap().is_none());
        assert!(h.service.long_rest(&id, RestOptions::default()).await.unwrap().is_none());
        assert_eq!(h.store.write_count(), 0);
        assert!(h.notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_long_rest_recovers_everything() {
        let actor = adventurer();
        let id = actor.id.clone();
        let dialogs = ScriptedDialogs { long_rest: true, ..ScriptedDialogs::default() };
        let h = harness(actor, dialogs);

        let outcome = h
            .service
            .long_rest(&id, RestOptions::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.hit_points_regained, 5);
        assert_eq!(outcome.stamina_regained, 8);
        assert_eq!(outcome.resolve_regained, 3);
        assert_eq!(outcome.item_patches.len(), 3);

        let actor = h.store.get(&id).await.unwrap().unwrap();
        assert_eq!(actor.data.attributes.hp.value, 15);
        assert_eq!(actor.data.attributes.rp.value, 5);
        assert_eq!(actor.data.abilities["con"].damage, 1);
        assert_eq!(actor.data.resources["focus"].value, 2);
        assert_eq!(actor.data.resources["daily"].value, 1);
        assert_eq!(actor.data.spells["spell1"].value, 4);
        assert!(actor.items.iter().all(|item| item.data.uses.as_ref().unwrap().value == 3));
    }

    #[tokio::test]
    async fn test_long_rest_caps_hit_points() {
        let mut actor = adventurer();
        actor.data.attributes.hp.value = 28;
        let id = actor.id.clone();
        let h = harness(actor, ScriptedDialogs::default());

        let outcome = h
            .service
            .long_rest(&id, RestOptions { dialog: false, chat: false })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.hit_points_regained, 2);
        assert_eq!(outcome.actor_patch.value("data.attributes.hp.value"), Some(&json!(30)));
    }

    fn drone(hit_points: i32) -> Actor {
        let mut actor = Actor::new("Sparky", ActorType::Drone);
        actor.data.attributes.hp.value = hit_points;
        actor.data.attributes.hp.max = 45;
        actor
    }

    #[tokio::test]
    async fn test_drone_repair_percentages() {
        let actor = drone(10);
        let id = actor.id.clone();
        let h = harness(actor, ScriptedDialogs::default());
        let outcome = h
            .service
            .repair_drone(&id, RestOptions { dialog: false, chat: true })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.hit_points_repaired, 4);
        assert_eq!(h.store.get(&id).await.unwrap().unwrap().data.attributes.hp.value, 14);

        let actor = drone(40);
        let id = actor.id.clone();
        let dialogs = ScriptedDialogs {
            drone_repair: Some(DroneRepairChoice { improved_repair: true }),
            ..ScriptedDialogs::default()
        };
        let h = harness(actor, dialogs);
        let outcome = h
            .service
            .repair_drone(&id, RestOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.hit_points_repaired, 5);
        assert_eq!(h.store.get(&id).await.unwrap().unwrap().data.attributes.hp.value, 45);
    }

    #[tokio::test]
    async fn test_healthy_drone_needs_no_repair() {
        let actor = drone(45);
        let id = actor.id.clone();
        let h = harness(actor, ScriptedDialogs::default());

        assert!(h.service.repair_drone(&id, RestOptions::default()).await.unwrap().is_none());
        assert_eq!(h.store.write_count(), 0);
        let events = h.notifier.events();
        assert!(matches!(events[0], ActorEvent::DroneRepairUnnecessary { .. }));
    }
}
