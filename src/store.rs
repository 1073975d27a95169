//! In-memory message store.
//!
//! The store owns the only mutable collection in the process. All four
//! operations may run concurrently from independent request workers; a
//! single `RwLock` around the backing `Vec` serializes mutations and gives
//! readers a consistent view. `list` copies out so callers never hold a
//! reference into the guarded collection.

use crate::palindrome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{PoisonError, RwLock};

/// Store error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no message found with the given ID")]
    NotFound,
}

/// A stored message. `is_palindrome` is derived from `text` exactly once,
/// at insertion time; `created_at` is internal and never serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub is_palindrome: bool,
}

/// Concurrency-safe collection of messages, in insertion order.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: RwLock<Vec<Message>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new message. The assigned ID is strictly greater than every
    /// ID currently present, so IDs stay unique across interleaved
    /// delete/add sequences regardless of which element was deleted last.
    pub fn add(&self, text: String, sender: String) -> Message {
        let mut messages = self
            .messages
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let message = Message {
            id,
            is_palindrome: palindrome::evaluate(&text),
            text,
            sender,
            created_at: Utc::now(),
        };
        messages.push(message.clone());
        metrics::counter!("data_messages_added_sum").increment(1);
        message
    }

    /// Snapshot of all messages in insertion order.
    pub fn list(&self) -> Vec<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_by_id(&self, id: u64) -> Result<Message, StoreError> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Remove the message with the given ID, preserving the relative order
    /// of the remaining messages.
    pub fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let mut messages = self
            .messages
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let index = messages
            .iter()
            .position(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;
        messages.remove(index);
        metrics::counter!("data_messages_deleted_sum").increment(1);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
