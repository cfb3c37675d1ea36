//! Domain services - Pure rules logic spanning several entities

mod crew_contexts;
mod modifier_collector;
mod roll_data;

pub use crew_contexts::{populate_crew_contexts, CrewRoster};
pub use modifier_collector::{
    collect_all_modifiers, is_modifier_source, CollectOptions, CollectedModifier,
    ModifierContainer,
};
pub use roll_data::{actor_roll_data, slugify};
