//! Dice roller port - Formula evaluation lives with the host
//!
//! The engine only assembles the formula terms and the roll context they
//! reference. Parsing, rolling and rendering the result are the host's job.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::RollContext;
use crate::domain::entities::{Actor, Item};
use crate::domain::value_objects::ActorId;

/// A d20 check to roll
#[derive(Debug, Clone)]
pub struct D20RollRequest {
    /// Formula terms added to the d20, such as `@abilities.dex.mod`
    pub parts: Vec<String>,
    pub context: RollContext,
    pub title: String,
    pub flavor: Option<String>,
    /// Actor the roll is announced as
    pub speaker: ActorId,
}

impl D20RollRequest {
    pub fn new(parts: Vec<String>, context: RollContext, title: impl Into<String>, speaker: ActorId) -> Self {
        Self {
            parts,
            context,
            title: title.into(),
            flavor: None,
            speaker,
        }
    }

    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }
}

/// Outcome of a roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub total: i32,
    pub formula: String,
}

/// Dice roller port
///
/// `Ok(None)` means the roller's own pre-roll dialog was cancelled.
#[async_trait]
pub trait DiceRollerPort: Send + Sync {
    /// Roll a d20 check
    async fn d20_roll(&self, request: D20RollRequest) -> Result<Option<RollResult>>;

    /// Roll an item's own action (attack, spell, ability)
    async fn item_roll(&self, actor: &Actor, item: &Item) -> Result<Option<RollResult>>;
}
