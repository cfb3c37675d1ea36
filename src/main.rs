//! SFRPG Engine - loads an actor snapshot and reports what applies to each actor

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sfrpg_engine::domain::services::{collect_all_modifiers, CollectOptions};
use sfrpg_engine::domain::value_objects::{ActorType, CrewRole};
use sfrpg_engine::infrastructure::config::AppConfig;
use sfrpg_engine::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SFRPG Engine");
    tracing::info!("  Snapshot: {}", config.snapshot_path.display());
    tracing::info!("  Crew pooling: {:?}", config.rules.pooled_crew_policy);

    let state = AppState::new(config).await?;
    tracing::info!("Application state initialized");

    for actor in state.store.list().await {
        tracing::info!("{} ({})", actor.name, actor.actor_type);

        for collected in collect_all_modifiers(&actor, CollectOptions::default()) {
            let modifier = collected.modifier;
            let source = match collected.container.item_id.and_then(|id| actor.item(id)) {
                Some(item) => item.name.as_str(),
                None => actor.name.as_str(),
            };
            tracing::info!(
                "  {} {} {} to {} from {}",
                modifier.name,
                modifier.value,
                modifier.bonus_type,
                modifier.value_affected,
                source
            );
        }

        match actor.actor_type {
            ActorType::Starship => {
                let actor = Arc::new(actor);
                let context = state
                    .roll_service
                    .roll_context(&actor, actor.roll_data(), &CrewRole::REPEATABLE)
                    .await?;
                for (selector, keys) in context.selectors() {
                    tracing::info!("  @{} -> [{}]", selector, keys.join(", "));
                }
            }
            ActorType::Character | ActorType::Npc => {
                state.roll_service.roll_save(&actor.id, "fort").await?;
            }
            _ => {}
        }
    }

    Ok(())
}
