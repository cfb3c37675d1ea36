//! Starfinder rule tables: ability, save and skill labels

/// Ability scores as (id, label)
pub const ABILITIES: [(&str, &str); 6] = [
    ("str", "Strength"),
    ("dex", "Dexterity"),
    ("con", "Constitution"),
    ("int", "Intelligence"),
    ("wis", "Wisdom"),
    ("cha", "Charisma"),
];

/// Saving throws as (id, label)
pub const SAVES: [(&str, &str); 3] = [
    ("fort", "Fortitude"),
    ("reflex", "Reflex"),
    ("will", "Will"),
];

/// Skills as (id, label); profession skills share the `pro` prefix
pub const SKILLS: [(&str, &str); 20] = [
    ("acr", "Acrobatics"),
    ("ath", "Athletics"),
    ("blu", "Bluff"),
    ("com", "Computers"),
    ("cul", "Culture"),
    ("dip", "Diplomacy"),
    ("dis", "Disguise"),
    ("eng", "Engineering"),
    ("int", "Intimidate"),
    ("lsc", "Life Science"),
    ("med", "Medicine"),
    ("mys", "Mysticism"),
    ("per", "Perception"),
    ("phs", "Physical Science"),
    ("pil", "Piloting"),
    ("pro", "Profession"),
    ("sen", "Sense Motive"),
    ("sle", "Sleight of Hand"),
    ("ste", "Stealth"),
    ("sur", "Survival"),
];

fn lookup(table: &[(&'static str, &'static str)], id: &str) -> Option<&'static str> {
    table.iter().find(|(key, _)| *key == id).map(|(_, label)| *label)
}

pub fn ability_label(id: &str) -> Option<&'static str> {
    lookup(&ABILITIES, id)
}

pub fn save_label(id: &str) -> Option<&'static str> {
    lookup(&SAVES, id)
}

/// Label of a skill; numbered variants (`pro1`, `pro2`) use their
/// three-letter base id
pub fn skill_label(id: &str) -> Option<&'static str> {
    lookup(&SKILLS, id.get(..3).unwrap_or(id))
}
