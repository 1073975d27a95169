//! Palindrome Server - HTTP REST API for palindrome-tagged messages
//!
//! This crate provides a small HTTP service that stores short text
//! messages in memory, tags each one with whether its normalized text is a
//! palindrome, and exposes CRUD access to them. It supports:
//!
//! - **Message CRUD**: create, list, fetch and delete messages
//! - **Palindrome tagging**: evaluated once at insertion time
//! - **Observability**: per-request trace IDs, structured latency logging,
//!   Prometheus-compatible metrics
//! - **Graceful Shutdown**: signal handling with a bounded drain window
//!
//! The store is purely in-memory and resets on restart.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /metrics` - Prometheus metrics
//! - `GET /api/v1/messages` - List all messages
//! - `POST /api/v1/messages` - Store a message
//! - `GET /api/v1/messages/{id}` - Fetch a message's text
//! - `DELETE /api/v1/messages/{id}` - Delete a message
//!
//! Every response carries an `x-request-id` header, echoing the inbound
//! value or a freshly generated identifier.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod palindrome;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
pub use store::{Message, MessageStore, StoreError};
