//! Modifier entity - one rules adjustment with stacking and provenance metadata

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::{
    BonusType, EffectType, ModifierGroup, ModifierId, ModifierKind, ModifierValue,
};

/// A rules adjustment attached to an actor or item
///
/// Two modifiers are the same modifier when their ids match, whatever their
/// other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub id: ModifierId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "modifier", default)]
    pub value: ModifierValue,
    #[serde(rename = "type", default)]
    pub bonus_type: BonusType,
    #[serde(default)]
    pub effect_type: EffectType,
    #[serde(default)]
    pub value_affected: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub subtab: ModifierGroup,
    #[serde(default)]
    pub condition: String,
    /// Host fields the rules do not read, kept for roll data and write-back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn enabled_by_default() -> bool {
    true
}

impl Modifier {
    pub fn kind(&self) -> ModifierKind {
        self.value.kind()
    }

    pub fn is_permanent(&self) -> bool {
        self.subtab == ModifierGroup::Permanent
    }
}

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Modifier {}

impl std::hash::Hash for Modifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Everything needed to create a modifier
///
/// Defaults describe an enabled, untyped +0 skill modifier in the `misc`
/// group with a freshly generated id.
#[derive(Debug, Clone, Default)]
pub struct ModifierDraft {
    pub name: String,
    pub value: ModifierValue,
    pub bonus_type: BonusType,
    pub effect_type: EffectType,
    pub value_affected: String,
    pub enabled: Option<bool>,
    pub source: String,
    pub notes: String,
    pub subtab: ModifierGroup,
    pub condition: String,
    pub id: Option<ModifierId>,
}

impl ModifierDraft {
    pub fn new(name: impl Into<String>, value: impl Into<ModifierValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_bonus_type(mut self, bonus_type: BonusType) -> Self {
        self.bonus_type = bonus_type;
        self
    }

    pub fn with_effect(mut self, effect_type: EffectType, value_affected: impl Into<String>) -> Self {
        self.effect_type = effect_type;
        self.value_affected = value_affected.into();
        self
    }

    pub fn with_subtab(mut self, subtab: ModifierGroup) -> Self {
        self.subtab = subtab;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_id(mut self, id: ModifierId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = Some(false);
        self
    }

    pub fn build(self) -> Modifier {
        Modifier {
            id: self.id.unwrap_or_default(),
            name: self.name,
            value: self.value,
            bonus_type: self.bonus_type,
            effect_type: self.effect_type,
            value_affected: self.value_affected,
            enabled: self.enabled.unwrap_or(true),
            source: self.source,
            notes: self.notes,
            subtab: self.subtab,
            condition: self.condition,
            extra: Map::new(),
        }
    }
}

impl From<ModifierDraft> for Modifier {
    fn from(draft: ModifierDraft) -> Self {
        draft.build()
    }
}
