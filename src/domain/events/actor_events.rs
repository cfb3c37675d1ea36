//! Actor events - Things that happened to an actor worth announcing
//!
//! Rest and repair outcomes are published as chat-style notifications when
//! the caller asks for them. Damage skipped on a vehicle or starship is
//! always published as a warning.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::{ActorId, ActorType};

/// Base data for all events
#[derive(Debug, Clone, Serialize)]
pub struct EventMetadata {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Optional correlation ID for tracing
    pub correlation_id: Option<String>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            correlation_id: None,
        }
    }
}

/// All actor events in the system
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActorEvent {
    // ========================================================================
    // Rest Events
    // ========================================================================

    /// An actor finished a short rest
    ShortRestTaken {
        metadata: EventMetadata,
        actor_id: ActorId,
        actor_name: String,
        resolve_spent: bool,
        stamina_regained: i32,
    },

    /// An actor finished a long rest
    LongRestTaken {
        metadata: EventMetadata,
        actor_id: ActorId,
        actor_name: String,
        hit_points_regained: i32,
        stamina_regained: i32,
        resolve_regained: i32,
    },

    // ========================================================================
    // Drone Events
    // ========================================================================

    /// A drone regained hit points through repair
    DroneRepaired {
        metadata: EventMetadata,
        actor_id: ActorId,
        actor_name: String,
        hit_points_repaired: i32,
        improved: bool,
    },

    /// A repair was requested for a drone already at full hit points
    DroneRepairUnnecessary {
        metadata: EventMetadata,
        actor_id: ActorId,
        actor_name: String,
    },

    // ========================================================================
    // Damage Events
    // ========================================================================

    /// Damage could not be applied to this kind of actor
    DamageSkipped {
        metadata: EventMetadata,
        actor_id: ActorId,
        actor_name: String,
        actor_type: ActorType,
    },
}

impl ActorEvent {
    pub fn actor_id(&self) -> &ActorId {
        match self {
            Self::ShortRestTaken { actor_id, .. }
            | Self::LongRestTaken { actor_id, .. }
            | Self::DroneRepaired { actor_id, .. }
            | Self::DroneRepairUnnecessary { actor_id, .. }
            | Self::DamageSkipped { actor_id, .. } => actor_id,
        }
    }

    /// Warnings are shown to the user rather than posted to chat
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::DamageSkipped { .. })
    }

    /// Human-readable chat line
    pub fn message(&self) -> String {
        match self {
            Self::ShortRestTaken {
                actor_name,
                resolve_spent,
                stamina_regained,
                ..
            } => {
                if *resolve_spent {
                    format!(
                        "{} takes a 10 minute rest, spends 1 Resolve Point and regains {} Stamina Points.",
                        actor_name, stamina_regained
                    )
                } else {
                    format!("{} takes a 10 minute rest.", actor_name)
                }
            }
            Self::LongRestTaken {
                actor_name,
                hit_points_regained,
                stamina_regained,
                resolve_regained,
                ..
            } => format!(
                "{} takes a night's rest and recovers {} Hit Points, {} Stamina Points and {} Resolve Points.",
                actor_name, hit_points_regained, stamina_regained, resolve_regained
            ),
            Self::DroneRepaired {
                actor_name,
                hit_points_repaired,
                ..
            } => format!("{} is repaired for {} Hit Points.", actor_name, hit_points_repaired),
            Self::DroneRepairUnnecessary { actor_name, .. } => {
                format!("{} is already at full Hit Points and does not need repairs.", actor_name)
            }
            Self::DamageSkipped {
                actor_name,
                actor_type,
                ..
            } => format!(
                "Damage cannot be applied to {} ({}); adjust its hull points directly.",
                actor_name, actor_type
            ),
        }
    }
}
