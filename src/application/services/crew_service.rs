//! Crew Service - crew membership and starship roll contexts

use std::sync::Arc;

use anyhow::Context;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::ActorRepositoryPort;
use crate::application::services::actor_service::load_actor;
use crate::application::services::errors::ActorOperationError;
use crate::domain::aggregates::RollContext;
use crate::domain::entities::Actor;
use crate::domain::services::{populate_crew_contexts, CrewRoster};
use crate::domain::value_objects::{ActorId, ActorType, CrewRole, EntityPatch, PooledCrewPolicy};

const CREW_MEMBER_FLAG: &str = "flags.sfrpg.crewMember";

/// Crew service
pub struct CrewService {
    store: Arc<dyn ActorRepositoryPort>,
    pooled_crew_policy: PooledCrewPolicy,
}

impl CrewService {
    pub fn new(store: Arc<dyn ActorRepositoryPort>, pooled_crew_policy: PooledCrewPolicy) -> Self {
        Self {
            store,
            pooled_crew_policy,
        }
    }

    /// The station `member_id` holds on a ship or vehicle
    #[instrument(skip(self))]
    pub async fn crew_role_for_actor(
        &self,
        ship_id: &ActorId,
        member_id: &ActorId,
    ) -> Result<Option<CrewRole>, ActorOperationError> {
        let ship = load_actor(self.store.as_ref(), ship_id).await?;
        Ok(ship.crew_role_for_actor(member_id)?)
    }

    /// Occupants of a station; `None` when the ship has no such station
    #[instrument(skip(self))]
    pub async fn actor_ids_for_role(
        &self,
        ship_id: &ActorId,
        role: CrewRole,
    ) -> Result<Option<Vec<ActorId>>, ActorOperationError> {
        let ship = load_actor(self.store.as_ref(), ship_id).await?;
        Ok(ship.crew_station(role)?.map(|station| station.actor_ids.clone()))
    }

    /// Record on a crew member which ship and station they serve
    #[instrument(skip(self))]
    pub async fn set_crew_member_role(
        &self,
        member_id: &ActorId,
        ship_id: &ActorId,
        role: CrewRole,
    ) -> Result<(), ActorOperationError> {
        let ship = load_actor(self.store.as_ref(), ship_id).await?;
        if !ship.actor_type.is_crewed() {
            return Err(ActorOperationError::UnsupportedActorType {
                operation: "set_crew_member_role",
                actor_type: ship.actor_type,
            });
        }
        load_actor(self.store.as_ref(), member_id).await?;

        let patch = EntityPatch::new().with(
            CREW_MEMBER_FLAG,
            json!({ "shipId": ship_id, "role": role }),
        );
        self.store
            .update(member_id, &patch)
            .await
            .context("Failed to set crew member role")?;
        info!(member_id = %member_id, ship_id = %ship_id, "Assigned crew role {}", role);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_from_crew(&self, member_id: &ActorId) -> Result<(), ActorOperationError> {
        let member = load_actor(self.store.as_ref(), member_id).await?;
        if member.flags.sfrpg.crew_member.is_none() {
            debug!(member_id = %member_id, "Actor is not serving on any crew");
            return Ok(());
        }

        let mut patch = EntityPatch::new();
        patch.remove(CREW_MEMBER_FLAG);
        self.store
            .update(member_id, &patch)
            .await
            .context("Failed to remove crew member")?;
        Ok(())
    }

    /// Load every actor seated on a ship
    ///
    /// Seats naming actors the store no longer has are skipped.
    pub async fn resolve_roster(&self, ship: &Actor) -> Result<CrewRoster, ActorOperationError> {
        let mut roster = CrewRoster::new();
        let Some(crew) = ship.data.crew.as_ref() else {
            return Ok(roster);
        };

        for (role, station) in crew {
            for member_id in &station.actor_ids {
                match self
                    .store
                    .get(member_id)
                    .await
                    .with_context(|| format!("Failed to load crew member {}", member_id))?
                {
                    Some(member) => roster.seat(*role, Arc::new(member)),
                    None => warn!(
                        ship_id = %ship.id,
                        member_id = %member_id,
                        "Crew member {} not found, seat skipped", role
                    ),
                }
            }
        }
        Ok(roster)
    }

    /// Register crew contexts for a starship roll
    ///
    /// Other actor types leave the context untouched.
    pub async fn setup_roll_contexts(
        &self,
        context: &mut RollContext,
        actor: &Actor,
        desired_selectors: &[CrewRole],
    ) -> Result<(), ActorOperationError> {
        if actor.actor_type != ActorType::Starship || actor.data.crew.is_none() {
            return Ok(());
        }

        let roster = self.resolve_roster(actor).await?;
        populate_crew_contexts(
            context,
            actor,
            &roster,
            desired_selectors,
            self.pooled_crew_policy,
        );
        Ok(())
    }
}
