//! Modifier collection - every modifier that currently applies to an actor
//!
//! Walks the actor's own modifiers and then its items in stored order. Each
//! item type carries a [`ModifierEligibility`] rule deciding whether that
//! item's modifiers count right now. Results pair each modifier with where
//! it lives; the modifier itself is never touched.

use crate::domain::entities::{Actor, Item, Modifier};
use crate::domain::value_objects::{ActorId, ItemId, ModifierEligibility};

/// Where a collected modifier lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierContainer<'a> {
    pub owner_id: &'a ActorId,
    /// `None` for modifiers stored on the actor itself
    pub item_id: Option<&'a ItemId>,
}

impl<'a> ModifierContainer<'a> {
    pub fn actor(owner_id: &'a ActorId) -> Self {
        Self {
            owner_id,
            item_id: None,
        }
    }

    pub fn item(owner_id: &'a ActorId, item_id: &'a ItemId) -> Self {
        Self {
            owner_id,
            item_id: Some(item_id),
        }
    }

    pub fn is_actor_level(&self) -> bool {
        self.item_id.is_none()
    }
}

/// A modifier together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectedModifier<'a> {
    pub modifier: &'a Modifier,
    pub container: ModifierContainer<'a>,
}

/// Collection switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Keep only actor-level modifiers in the `permanent` group. Item
    /// modifiers are not affected.
    pub ignore_temporary: bool,
    /// Skip worn/wielded equipment and anything installed in it
    pub ignore_equipment: bool,
}

/// Collect every modifier that currently applies to `actor`
///
/// Actor-level modifiers come first, then each eligible item's modifiers in
/// item order. Malformed item data never fails the collection: missing
/// modifier lists read as empty and missing containers as "not installed".
pub fn collect_all_modifiers(actor: &Actor, options: CollectOptions) -> Vec<CollectedModifier<'_>> {
    let actor_level = actor
        .data
        .modifiers
        .iter()
        .filter(|modifier| !options.ignore_temporary || modifier.is_permanent())
        .map(|modifier| CollectedModifier {
            modifier,
            container: ModifierContainer::actor(&actor.id),
        });

    let item_level = actor
        .items
        .iter()
        .filter(|item| is_modifier_source(actor, item, options))
        .flat_map(|item| {
            let container = ModifierContainer::item(&actor.id, &item.id);
            item.modifiers()
                .iter()
                .map(move |modifier| CollectedModifier { modifier, container })
        });

    actor_level.chain(item_level).collect()
}

/// Whether `item`'s modifiers currently apply to its owner
pub fn is_modifier_source(actor: &Actor, item: &Item, options: CollectOptions) -> bool {
    match item.item_type.modifier_eligibility() {
        ModifierEligibility::UnlessUnequipped => item.is_not_unequipped(),
        ModifierEligibility::WhenEquipped => !options.ignore_equipment && item.is_equipped(),
        ModifierEligibility::InstalledIn(host_type) => {
            if options.ignore_equipment {
                return false;
            }
            match actor.container_of(&item.id) {
                Some(host) => host.item_type == host_type && host.is_equipped(),
                None => {
                    tracing::trace!(
                        actor_id = %actor.id,
                        item_id = %item.id,
                        "Attachment is not installed in any item"
                    );
                    false
                }
            }
        }
        ModifierEligibility::WhenPassiveOrActive => item.is_passive() || item.is_active(),
        ModifierEligibility::Always => true,
        ModifierEligibility::Never => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Activation, ModifierDraft};
    use crate::domain::value_objects::{ActorType, ItemType, ModifierGroup};

    fn modifier(name: &str) -> Modifier {
        ModifierDraft::new(name, 1).build()
    }

    fn names(collected: &[CollectedModifier<'_>]) -> Vec<String> {
        collected.iter().map(|c| c.modifier.name.clone()).collect()
    }

    #[test]
    fn test_actor_level_only() {
        let actor = Actor::new("Iseph", ActorType::Character)
            .with_modifier(modifier("a"))
            .with_modifier(modifier("b"));

        let collected = collect_all_modifiers(&actor, CollectOptions::default());

        assert_eq!(names(&collected), vec!["a", "b"]);
        assert!(collected.iter().all(|c| c.container == ModifierContainer::actor(&actor.id)));
    }

    #[test]
    fn test_only_equipped_weapons_contribute() {
        let equipped = Item::new("Plasma Sword", ItemType::Weapon)
            .equipped(true)
            .with_modifier(modifier("sword 1"))
            .with_modifier(modifier("sword 2"));
        let stowed = Item::new("Laser Pistol", ItemType::Weapon)
            .equipped(false)
            .with_modifier(modifier("pistol"));
        let equipped_id = equipped.id.clone();
        let actor = Actor::new("Keskodai", ActorType::Character)
            .with_item(equipped)
            .with_item(stowed);

        let collected = collect_all_modifiers(&actor, CollectOptions::default());

        assert_eq!(names(&collected), vec!["sword 1", "sword 2"]);
        assert!(collected
            .iter()
            .all(|c| c.container == ModifierContainer::item(&actor.id, &equipped_id)));
    }

    #[test]
    fn test_weapon_without_equipped_flag_does_not_contribute() {
        let weapon = Item::new("Knife", ItemType::Weapon).with_modifier(modifier("knife"));
        let actor = Actor::new("Quig", ActorType::Character).with_item(weapon);
        assert!(collect_all_modifiers(&actor, CollectOptions::default()).is_empty());
    }

    #[test]
    fn test_accessory_follows_its_weapon() {
        let accessory = Item::new("Laser Sight", ItemType::WeaponAccessory)
            .with_modifier(modifier("sight"));
        let rifle = Item::new("Rifle", ItemType::Weapon).containing(accessory.id.clone());

        let equipped_actor = Actor::new("Navasi", ActorType::Character)
            .with_item(rifle.clone().equipped(true))
            .with_item(accessory.clone());
        let collected = collect_all_modifiers(&equipped_actor, CollectOptions::default());
        assert_eq!(names(&collected), vec!["sight"]);
        assert_eq!(collected[0].container.item_id, Some(&accessory.id));

        let stowed_actor = Actor::new("Navasi", ActorType::Character)
            .with_item(rifle.equipped(false))
            .with_item(accessory);
        assert!(collect_all_modifiers(&stowed_actor, CollectOptions::default()).is_empty());
    }

    #[test]
    fn test_upgrade_needs_equipped_armor_host() {
        let upgrade = Item::new("Jump Jets", ItemType::Upgrade).with_modifier(modifier("jets"));
        let in_weapon = Item::new("Rifle", ItemType::Weapon)
            .equipped(true)
            .containing(upgrade.id.clone());
        let actor = Actor::new("Altronus", ActorType::Character)
            .with_item(in_weapon)
            .with_item(upgrade.clone());
        assert!(collect_all_modifiers(&actor, CollectOptions::default()).is_empty());

        let armor = Item::new("Vesk Overplate", ItemType::Equipment)
            .equipped(true)
            .containing(upgrade.id.clone());
        let actor = Actor::new("Altronus", ActorType::Character)
            .with_item(armor)
            .with_item(upgrade);
        let collected = collect_all_modifiers(&actor, CollectOptions::default());
        assert_eq!(names(&collected), vec!["jets"]);

        let ignoring = CollectOptions { ignore_equipment: true, ..CollectOptions::default() };
        assert!(collect_all_modifiers(&actor, ignoring).is_empty());
    }

    #[test]
    fn test_uninstalled_attachment_yields_nothing() {
        let fusion = Item::new("Flaming Fusion", ItemType::Fusion).with_modifier(modifier("fire"));
        let actor = Actor::new("Keskodai", ActorType::Character).with_item(fusion);
        assert!(collect_all_modifiers(&actor, CollectOptions::default()).is_empty());
    }

    #[test]
    fn test_feats_and_augmentations() {
        let passive = Item::new("Toughness", ItemType::Feat).with_modifier(modifier("passive"));
        let mut inactive = Item::new("Fight Defensively", ItemType::Feat)
            .with_modifier(modifier("inactive"));
        inactive.data.activation = Some(Activation { kind: "standard".to_string(), ..Activation::default() });
        let mut active = inactive.clone();
        active.id = ItemId::new();
        active.data.is_active = Some(true);
        active.data.modifiers = Some(vec![modifier("active")]);
        let augmentation = Item::new("Dermal Plating", ItemType::Augmentation)
            .equipped(false)
            .with_modifier(modifier("augment"));

        let actor = Actor::new("Iseph", ActorType::Character)
            .with_item(passive)
            .with_item(inactive)
            .with_item(active)
            .with_item(augmentation);

        let collected = collect_all_modifiers(&actor, CollectOptions::default());
        assert_eq!(names(&collected), vec!["passive", "active", "augment"]);
    }

    #[test]
    fn test_default_rule_and_unknown_types() {
        let race = Item::new("Vesk", ItemType::Race).with_modifier(modifier("race"));
        let unequipped_theme = Item::new("Ace Pilot", ItemType::Theme)
            .equipped(false)
            .with_modifier(modifier("theme"));
        let unknown = Item::new("Mystery", ItemType::Unknown("vehicleSystem".to_string())).with_modifier(modifier("unknown"));
        let actor = Actor::new("Obozaya", ActorType::Character)
            .with_item(race)
            .with_item(unequipped_theme)
            .with_item(unknown);

        let collected = collect_all_modifiers(&actor, CollectOptions::default());
        assert_eq!(names(&collected), vec!["race"]);
    }

    #[test]
    fn test_ignore_temporary_only_filters_actor_level() {
        let permanent = ModifierDraft::new("permanent", 1)
            .with_subtab(ModifierGroup::Permanent)
            .build();
        let temporary = ModifierDraft::new("temporary", 1)
            .with_subtab(ModifierGroup::Temporary)
            .build();
        let misc = modifier("misc");
        let item_temporary = ModifierDraft::new("item temporary", 1)
            .with_subtab(ModifierGroup::Temporary)
            .build();
        let race = Item::new("Android", ItemType::Race).with_modifier(item_temporary);
        let actor = Actor::new("Quig", ActorType::Character)
            .with_modifier(permanent)
            .with_modifier(temporary)
            .with_modifier(misc)
            .with_item(race);

        let options = CollectOptions { ignore_temporary: true, ..CollectOptions::default() };
        let collected = collect_all_modifiers(&actor, options);
        assert_eq!(names(&collected), vec!["permanent", "item temporary"]);
    }

    #[test]
    fn test_collection_is_repeatable() {
        let armor = Item::new("Freebooter Armor", ItemType::Equipment)
            .equipped(true)
            .with_modifier(modifier("armor"));
        let actor = Actor::new("Raia", ActorType::Character)
            .with_modifier(modifier("own"))
            .with_item(armor);

        let first = collect_all_modifiers(&actor, CollectOptions::default());
        let second = collect_all_modifiers(&actor, CollectOptions::default());
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.modifier.id, b.modifier.id);
            assert_eq!(a.container, b.container);
        }
    }
}
