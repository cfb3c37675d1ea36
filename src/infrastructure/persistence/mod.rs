//! Persistence adapters
//!
//! The host owns the real actor store. This module provides an in-memory
//! store loaded from a JSON snapshot, used by the inspection binary and by
//! the service tests.

mod memory_store;

pub use memory_store::InMemoryActorStore;
