//! Conversation types.
//!
//! A conversation is an ordered sequence of [`Turn`]s that is replayed to the
//! model on every request. Wire encoding lives in the provider adapter.

use serde::Serialize;
use serde_json::Value;

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Unique identifier for this call (used to correlate results).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// Arguments as JSON.
    pub input: Value,
}

/// Result of a tool execution, paired with the call ID.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// ID of the tool call this result corresponds to.
    pub tool_use_id: String,
    /// Text returned to the model.
    pub content: String,
    /// Whether the tool failed to produce a result at all.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a result for a tool that ran to completion.
    pub fn success(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Create a result for a tool that could not complete.
    pub fn error(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

/// One recorded unit of conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// A message typed by the user.
    User(String),
    /// The display text the assistant produced for a round.
    Assistant(String),
    /// A tool invocation requested by the assistant.
    ToolCall(ToolCall),
    /// The outcome of a tool invocation, sent back as a user turn.
    ToolResult(ToolResult),
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::User(text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant(text.into())
    }
}

/// Tool specification exposed to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for input parameters.
    pub input_schema: Value,
}
