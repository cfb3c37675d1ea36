//! Domain layer - Starfinder actor rules with no external dependencies
//!
//! This layer contains:
//! - Entities: Actor, Item, Modifier
//! - Value Objects: identifiers, item and actor kinds, crew roles, roll data, patches
//! - Aggregates: the per-roll Roll Context
//! - Domain Events: rest, repair and damage notifications
//! - Domain Services: modifier collection, roll data, crew contexts

pub mod aggregates;
pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;
