pub mod decoder;
pub mod extract;
pub mod conversation;
pub mod orchestrator;
pub mod ports;
pub mod event_bus;
