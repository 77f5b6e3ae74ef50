use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("timeout after {0}s")]
    Timeout(u64),
    #[error("execution failed: {0}")]
    Execution(String),
}
