//! Domain events - Notifications of actor state changes

mod actor_events;

pub use actor_events::{ActorEvent, EventMetadata};
