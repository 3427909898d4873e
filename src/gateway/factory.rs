use std::sync::Arc;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;

pub fn create_publisher(via: GatewayPublisherVia) -> Arc<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Logs => {
            Arc::new(LogPublisher::new())
        }
        GatewayPublisherVia::Memory(publisher) => {
            Arc::new(publisher)
        }
    }
}
