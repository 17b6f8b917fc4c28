//! Browser adapters for the chat-core client ports.

pub mod http;
pub mod timer;

pub use http::HttpChatTransport;
pub use timer::BrowserTimer;
