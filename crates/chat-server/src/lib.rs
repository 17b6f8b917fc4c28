//! chat-server library: configuration, provider adapter and HTTP routes.
//!
//! `main.rs` only parses configuration, installs tracing and serves
//! the router built here; integration tests drive the same router.

pub mod config;
pub mod error;
pub mod middleware;
pub mod provider;
pub mod routes;
pub mod state;
