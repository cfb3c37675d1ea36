//! SFRPG Engine - Starfinder actor rules
//!
//! Collects the modifiers that apply to an actor, builds the roll contexts
//! a formula resolves against (including a starship's crew stations) and
//! runs the actor operations: rolls, rests, damage, skills and modifiers.

pub mod application;
pub mod domain;
pub mod infrastructure;
