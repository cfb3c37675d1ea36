//! Roll data assembly for actors

use serde_json::{json, Map, Value};

use crate::domain::entities::Actor;
use crate::domain::value_objects::{ItemType, RollData};

/// Build the roll data of an actor
///
/// The actor's data tree, plus a `classes` table keyed by slugified class
/// name and `cl`, the summed levels of spellcasting classes.
pub fn actor_roll_data(actor: &Actor) -> RollData {
    let mut data = match serde_json::to_value(&actor.data) {
        Ok(value) => RollData::from_value(value),
        Err(e) => {
            tracing::warn!(actor_id = %actor.id, "Failed to serialize actor data for rolls: {}", e);
            RollData::new()
        }
    };

    let mut classes = Map::new();
    let mut caster_level = 0;
    for class in actor.items_of_type(ItemType::Class) {
        let key_ability = class
            .data
            .kas
            .as_deref()
            .filter(|kas| !kas.is_empty())
            .unwrap_or("str");
        let levels = class.data.levels.unwrap_or(0);
        if class.data.is_caster {
            caster_level += levels;
        }

        classes.insert(
            slugify(&class.name),
            json!({
                "keyAbilityMod": actor.data.abilities.get(key_ability).map_or(0, |a| a.modifier),
                "levels": levels,
                "keyAbilityScore": key_ability,
                "skillRanksPerLevel": class.data.skill_ranks.as_ref().map_or(0, |r| r.value),
            }),
        );
    }

    data.insert("classes", Value::Object(classes));
    data.insert("cl", caster_level);
    data
}

/// Lowercase, whitespace runs to `_`, everything else non-alphanumeric dropped
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
                .to_lowercase()
        })
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Ability, Item, SkillRanks};
    use crate::domain::value_objects::ActorType;

    fn class_item(name: &str, kas: &str, levels: i32, is_caster: bool) -> Item {
        let mut item = Item::new(name, ItemType::Class);
        item.data.kas = Some(kas.to_string());
        item.data.levels = Some(levels);
        item.data.is_caster = is_caster;
        item.data.skill_ranks = Some(SkillRanks { value: 4 });
        item
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Solar Mystic"), "solar_mystic");
        assert_eq!(slugify("Envoy (Alt)"), "envoy_alt");
        assert_eq!(slugify("  Technomancer "), "technomancer");
    }

    #[test]
    fn test_classes_and_caster_level() {
        let mut actor = Actor::new("Raia", ActorType::Character)
            .with_item(class_item("Technomancer", "int", 3, true))
            .with_item(class_item("Mystic", "wis", 2, true))
            .with_item(class_item("Soldier", "", 1, false));
        actor.data.abilities.insert(
            "int".to_string(),
            Ability { value: 18, modifier: 4, ..Ability::default() },
        );
        actor.data.abilities.insert(
            "str".to_string(),
            Ability { value: 12, modifier: 1, ..Ability::default() },
        );

        let data = actor.roll_data();
        assert_eq!(data.number("cl"), Some(5.0));
        assert_eq!(data.number("classes.technomancer.keyAbilityMod"), Some(4.0));
        assert_eq!(data.number("classes.technomancer.skillRanksPerLevel"), Some(4.0));
        assert_eq!(data.number("classes.mystic.keyAbilityMod"), Some(0.0));
        assert_eq!(
            data.get("classes.soldier.keyAbilityScore").and_then(|v| v.as_str()),
            Some("str")
        );
        assert_eq!(data.number("classes.soldier.keyAbilityMod"), Some(1.0));
        assert_eq!(data.number("abilities.int.mod"), Some(4.0));
    }

    #[test]
    fn test_host_fields_reach_roll_data() {
        let actor: Actor = serde_json::from_value(json!({
            "id": "a1B2c3D4e5F6g7H8",
            "name": "Space Goblin",
            "type": "npc",
            "data": {
                "attributes": {
                    "hp": { "value": 17, "max": 17 },
                    "eac": { "value": 15 },
                    "kac": { "value": 17 }
                },
                "details": { "cr": 3, "alignment": "CE" },
                "abilities": { "dex": { "value": 14, "mod": 2, "misc": 1 } }
            }
        }))
        .unwrap();

        let data = actor.roll_data();
        assert_eq!(data.number("attributes.eac.value"), Some(15.0));
        assert_eq!(data.number("attributes.kac.value"), Some(17.0));
        assert_eq!(data.number("details.cr"), Some(3.0));
        assert_eq!(data.get("details.alignment").and_then(|v| v.as_str()), Some("CE"));
        assert_eq!(data.number("abilities.dex.misc"), Some(1.0));
        assert_eq!(data.number("attributes.hp.max"), Some(17.0));
        assert_eq!(data.number("abilities.dex.mod"), Some(2.0));
    }
}
