//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::{DialogPort, DiceRollerPort, NotificationPort};
use crate::application::services::{
    ActorService, CrewService, ModifierService, RestService, RollService, SkillService,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dialogs::HeadlessDialogs;
use crate::infrastructure::dice::TakeTenRoller;
use crate::infrastructure::notifications::TracingNotifier;
use crate::infrastructure::persistence::InMemoryActorStore;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<InMemoryActorStore>,
    // Application services
    pub actor_service: ActorService,
    pub crew_service: Arc<CrewService>,
    pub roll_service: RollService,
    pub rest_service: RestService,
    pub skill_service: SkillService,
    pub modifier_service: ModifierService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = if config.snapshot_path.exists() {
            InMemoryActorStore::from_json_file(&config.snapshot_path)
                .await
                .with_context(|| format!("Failed to load {}", config.snapshot_path.display()))?
        } else {
            tracing::warn!(
                "Snapshot {} not found, starting with an empty store",
                config.snapshot_path.display()
            );
            InMemoryActorStore::new()
        };
        let store = Arc::new(store);

        let notifier: Arc<dyn NotificationPort> = Arc::new(TracingNotifier);
        let dialogs: Arc<dyn DialogPort> = Arc::new(HeadlessDialogs::default());
        let roller: Arc<dyn DiceRollerPort> = Arc::new(TakeTenRoller);
        let rules = config.rules.clone();

        let crew_service = Arc::new(CrewService::new(store.clone(), rules.pooled_crew_policy));
        let actor_service = ActorService::new(store.clone(), notifier.clone());
        let roll_service = RollService::new(
            store.clone(),
            roller,
            dialogs.clone(),
            crew_service.clone(),
        );
        let rest_service = RestService::new(store.clone(), dialogs.clone(), notifier, rules.clone());
        let skill_service = SkillService::new(store.clone(), dialogs, rules);
        let modifier_service = ModifierService::new(store.clone());

        Ok(Self {
            config,
            store,
            actor_service,
            crew_service,
            roll_service,
            rest_service,
            skill_service,
            modifier_service,
        })
    }
}
