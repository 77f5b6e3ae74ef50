//! Provider-agnostic conversation types.

pub mod errors;
mod types;

pub use errors::TransportError;
pub use types::{ToolCall, ToolResult, ToolSpec, Turn};
