//! Aggregates - Cluster of domain objects treated as a single unit

pub mod roll_context;

pub use roll_context::{RollContext, RollContextEntry, RollContextError};
