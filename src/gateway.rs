use crate::gateway::memory::publisher::MemoryPublisher;

pub mod events;
pub mod factory;
pub mod logs;
pub mod memory;

#[derive(Debug, Clone)]
pub enum GatewayPublisherVia {
    Logs,
    Memory(MemoryPublisher),
}
