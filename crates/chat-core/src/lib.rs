pub mod ports;
pub mod fallback;
pub mod resolver;
pub mod transcript;
pub mod client;
pub mod event_bus;
