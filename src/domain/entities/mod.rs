//! Domain entities - Core business objects with identity

mod actor;
mod item;
mod modifier;

pub use actor::{
    Ability, Actor, ActorData, ActorFlags, ActorResource, Attributes, CrewError, CrewMembership,
    CrewStation, Details, HitPoints, Level, Pool, SaveBonus, Skill, SpellSlots, SystemFlags,
    TokenSettings, Traits,
};
pub use item::{Activation, Item, ItemData, ItemUses, Preparation, RechargePeriod, SkillRanks};
pub use modifier::{Modifier, ModifierDraft};
