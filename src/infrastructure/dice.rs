//! Take-ten dice roller
//!
//! Resolves every `@` term against the roll context and adds 10 in place of
//! the d20. Terms addressing a selector add up every selected value. Dice
//! expressions are not evaluated; the host's roller does that.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::application::ports::outbound::{D20RollRequest, DiceRollerPort, RollResult};
use crate::domain::aggregates::RollContext;
use crate::domain::entities::{Actor, Item};

const TAKE_TEN: i32 = 10;

#[derive(Debug, Clone, Default)]
pub struct TakeTenRoller;

impl TakeTenRoller {
    fn term_value(context: &RollContext, part: &str) -> i32 {
        if part.starts_with('@') {
            return context
                .resolve_all(part)
                .into_iter()
                .filter_map(|(_, value)| value.as_f64())
                .map(|value| value as i32)
                .sum();
        }
        match part.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Cannot evaluate roll term {}, counted as 0", part);
                0
            }
        }
    }
}

#[async_trait]
impl DiceRollerPort for TakeTenRoller {
    async fn d20_roll(&self, request: D20RollRequest) -> Result<Option<RollResult>> {
        let values: Vec<i32> = request
            .parts
            .iter()
            .map(|part| Self::term_value(&request.context, part))
            .collect();
        let total = TAKE_TEN + values.iter().sum::<i32>();
        let formula = std::iter::once(TAKE_TEN)
            .chain(values)
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(" + ");

        info!(speaker = %request.speaker, total, "{}: {}", request.title, formula);
        Ok(Some(RollResult { total, formula }))
    }

    async fn item_roll(&self, actor: &Actor, item: &Item) -> Result<Option<RollResult>> {
        info!(actor_id = %actor.id, item_id = %item.id, "{} uses {}", actor.name, item.name);
        Ok(Some(RollResult {
            total: TAKE_TEN,
            formula: Value::from(TAKE_TEN).to_string(),
        }))
    }
}
