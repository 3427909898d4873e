use async_trait::async_trait;
use tracing::warn;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;

#[async_trait]
pub trait EventPublisher: Sync + Send {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError>;
}

// Events go out after the change is committed, so a failure here is logged and
// never reported as a failure of the operation itself.
pub(crate) async fn publish_committed(publisher: &dyn EventPublisher, event: serde_json::Result<DomainEvent>) {
    match event {
        Ok(event) => {
            if let Err(err) = publisher.publish(&event).await {
                warn!(name = %event.name, key = %event.key, "failed to publish domain event: {}", err);
            }
        }
        Err(err) => {
            warn!("failed to build domain event: {}", err);
        }
    }
}
