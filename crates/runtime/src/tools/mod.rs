//! Local tool execution.

mod bash;
pub mod errors;

pub use bash::{BashTool, CommandOutcome, CommandResult, BASH_TOOL};
pub use errors::ToolError;
