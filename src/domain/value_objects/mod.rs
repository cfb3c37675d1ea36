//! Value objects - Immutable objects defined by their attributes

mod actor_type;
mod crew_role;
mod ids;
mod item_type;
mod modifier_types;
mod patch;
mod roll_data;
pub mod rule_system;
mod settings;

pub use actor_type::{ActorType, Size};
pub use crew_role::{CrewRole, PooledCrewPolicy};
pub use ids::*;
pub use item_type::{ItemType, ModifierEligibility};
pub use modifier_types::{BonusType, EffectType, ModifierGroup, ModifierKind, ModifierValue};
pub use patch::{EntityPatch, ItemPatch, PatchOp};
pub use roll_data::RollData;
pub use settings::RulesSettings;
