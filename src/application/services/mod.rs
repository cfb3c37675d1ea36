//! Application services - Actor use case implementations
//!
//! Each service holds the ports it needs, loads actors from the store,
//! runs the domain rules and writes patches back.

pub mod actor_service;
pub mod crew_service;
pub mod errors;
pub mod modifier_service;
pub mod rest_service;
pub mod roll_service;
pub mod skill_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use actor_service::{sync_token_size, ActorService, DamageOutcome};
pub use crew_service::CrewService;
pub use errors::ActorOperationError;
pub use modifier_service::ModifierService;
pub use rest_service::{
    DroneRepairOutcome, LongRestOutcome, RestOptions, RestService, ShortRestOutcome,
};
pub use roll_service::RollService;
pub use skill_service::SkillService;
