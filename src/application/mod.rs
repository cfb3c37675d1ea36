//! Application layer - Use cases and port definitions
//!
//! This layer contains:
//! - Ports: traits for the host's store, dice roller, dialogs and notifications
//! - Services: actor operations built on the domain rules

pub mod ports;
pub mod services;
