//! Crew contexts - starship stations as roll contexts
//!
//! Registers one roll context per seated crew member so a starship check
//! can draw on, say, the pilot's Piloting bonus or every gunner's attack.
//! Captain and pilot are singleton stations keyed by their role name. The
//! remaining stations are numbered per occupant (`gunner1`, `gunner2`, ...).
//! Pooled stations (minor crew, open crew) number every occupant they sweep.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::aggregates::RollContext;
use crate::domain::entities::Actor;
use crate::domain::value_objects::{ActorType, CrewRole, PooledCrewPolicy};

/// A ship's crew with occupants loaded
#[derive(Debug, Clone, Default)]
pub struct CrewRoster {
    stations: BTreeMap<CrewRole, Vec<Arc<Actor>>>,
}

impl CrewRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(&mut self, role: CrewRole, actor: Arc<Actor>) {
        self.stations.entry(role).or_default().push(actor);
    }

    pub fn with(mut self, role: CrewRole, actor: Arc<Actor>) -> Self {
        self.seat(role, actor);
        self
    }

    /// Occupants of a station in seating order
    pub fn occupants(&self, role: CrewRole) -> &[Arc<Actor>] {
        self.stations.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All stations in role order
    pub fn stations(&self) -> impl Iterator<Item = (CrewRole, &[Arc<Actor>])> {
        self.stations
            .iter()
            .map(|(role, actors)| (*role, actors.as_slice()))
    }
}

/// Register crew contexts and the requested selectors for a starship
///
/// Does nothing for actors that are not starships. For a given roster the
/// generated keys and selector contents are always the same.
pub fn populate_crew_contexts(
    context: &mut RollContext,
    actor: &Actor,
    roster: &CrewRoster,
    desired_selectors: &[CrewRole],
    policy: PooledCrewPolicy,
) {
    if actor.actor_type != ActorType::Starship {
        return;
    }

    for role in [CrewRole::Captain, CrewRole::Pilot] {
        if let Some(first) = roster.occupants(role).first() {
            context.add_context(role.key(), Arc::clone(first), None);
        }
    }

    for role in CrewRole::REPEATABLE {
        let occupants: Vec<&Arc<Actor>> = if role.is_pooled() {
            roster
                .stations()
                .filter(|(station, _)| match policy {
                    PooledCrewPolicy::SweepAll => true,
                    PooledCrewPolicy::ExcludeAssigned => station.is_pooled(),
                })
                .flat_map(|(_, actors)| actors.iter())
                .collect()
        } else {
            roster.occupants(role).iter().collect()
        };

        let keys: Vec<String> = occupants
            .into_iter()
            .enumerate()
            .map(|(index, occupant)| {
                let key = format!("{}{}", role.key(), index + 1);
                context.add_context(key.clone(), Arc::clone(occupant), None);
                key
            })
            .collect();

        if desired_selectors.contains(&role) {
            context.add_selector(role.key(), keys);
        }
    }

    tracing::debug!(
        actor_id = %actor.id,
        contexts = context.len(),
        "Registered crew roll contexts"
    );
}
