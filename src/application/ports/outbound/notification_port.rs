use anyhow::Result;
use async_trait::async_trait;

use crate::domain::events::ActorEvent;

/// Sink for actor events: chat cards, user notifications, audit logs
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn publish(&self, event: ActorEvent) -> Result<()>;
}
