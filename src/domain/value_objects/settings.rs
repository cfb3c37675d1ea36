//! Rules settings value object
//!
//! House-rule knobs for the actor operations. Defaults reproduce the
//! published rules; each can be overridden from the environment.

use serde::{Deserialize, Serialize};

use super::PooledCrewPolicy;

/// Tunable rules behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RulesSettings {
    // Starship crew
    pub pooled_crew_policy: PooledCrewPolicy,

    // Drone repair, as a percentage of maximum hit points
    pub drone_repair_percent: i32,
    pub improved_drone_repair_percent: i32,

    // Skills
    pub class_skill_bonus: i32,
}

impl Default for RulesSettings {
    fn default() -> Self {
        Self {
            pooled_crew_policy: PooledCrewPolicy::SweepAll,
            drone_repair_percent: 10,
            improved_drone_repair_percent: 25,
            class_skill_bonus: 3,
        }
    }
}

impl RulesSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            pooled_crew_policy: env_or("SFRPG_CREW_POOL_POLICY", defaults.pooled_crew_policy),
            drone_repair_percent: env_or("SFRPG_DRONE_REPAIR_PERCENT", defaults.drone_repair_percent),
            improved_drone_repair_percent: env_or(
                "SFRPG_IMPROVED_DRONE_REPAIR_PERCENT",
                defaults.improved_drone_repair_percent,
            ),
            class_skill_bonus: env_or("SFRPG_CLASS_SKILL_BONUS", defaults.class_skill_bonus),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
