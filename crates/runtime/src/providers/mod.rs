//! LLM provider adapters.
//!
//! The [`Backend`] trait is the seam between the chat round and the network:
//! it moves one request to the provider and hands back the raw JSON body.
//! Interpreting that body is the session's job.

pub mod anthropic;

pub use anthropic::{AnthropicBackend, AnthropicBackendBuilder, MessagesRequest};

use crate::llm::TransportError;
use serde_json::Value;
use std::future::Future;

/// Trait for LLM provider backends.
pub trait Backend: Send + Sync {
    /// Send one request and return the parsed response body.
    fn send(
        &self,
        request: &MessagesRequest,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}
