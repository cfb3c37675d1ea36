//! Notification sink writing actor events to the log

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::outbound::NotificationPort;
use crate::domain::events::ActorEvent;

/// Publishes events as tracing records
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl NotificationPort for TracingNotifier {
    async fn publish(&self, event: ActorEvent) -> Result<()> {
        let actor_id = event.actor_id();
        if event.is_warning() {
            tracing::warn!(actor_id = %actor_id, "{}", event.message());
        } else {
            tracing::info!(actor_id = %actor_id, "{}", event.message());
        }
        Ok(())
    }
}
