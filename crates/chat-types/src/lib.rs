pub mod message;
pub mod api;
pub mod event;
pub mod config;
pub mod error;


pub use error::{ChatError, ProviderError};
pub type Result<T> = std::result::Result<T, ChatError>;
