//! Agent runtime — conversation, provider transport, and command execution.
//!
//! # Overview
//!
//! The runtime is organized around these concepts:
//!
//! - **Session**: owns the conversation history and runs one chat round at a
//!   time: record the user turn, send the history, interpret the reply.
//! - **Backend**: a trait over the provider call. [`AnthropicBackend`] posts
//!   to the Anthropic Messages API.
//! - **BashTool**: runs the shell commands the model asks for, bounded by a
//!   timeout.
//!
//! # Example
//!
//! ```no_run
//! use runtime::{AnthropicBackend, Session};
//!
//! # async fn example() -> runtime::Result<()> {
//! let backend = AnthropicBackend::builder("sk-ant-api01-...").build();
//! let mut session = Session::new(backend).with_system("You manage Proxmox VMs.");
//!
//! let reply = session.chat("list all VMs").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

mod error;
pub mod llm;
pub mod providers;
mod session;
pub mod tools;

pub use error::{Error, Result};
pub use llm::{ToolCall, ToolResult, ToolSpec, TransportError, Turn};
pub use providers::{AnthropicBackend, Backend, MessagesRequest};
pub use session::Session;
pub use tools::{BashTool, CommandOutcome, CommandResult, ToolError};
