//! Infrastructure layer - Adapters for the outbound ports
//!
//! This layer contains:
//! - Persistence: in-memory actor store loaded from a JSON snapshot
//! - Dialogs: headless answers for interactive prompts
//! - Dice: take-ten roller
//! - Notifications: events written to the log
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod dialogs;
pub mod dice;
pub mod notifications;
pub mod persistence;
pub mod state;
