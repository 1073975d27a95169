//! API route handlers
//!
//! - `health`: liveness probe and Prometheus metrics exposition
//! - `messages`: message CRUD under `/api/v1/messages`

pub mod health;
pub mod messages;

use crate::error::ServerError;

/// 404 Not Found handler for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
