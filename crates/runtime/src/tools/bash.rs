//! Shell command tool.
//!
//! Runs whatever command the model asks for with the privileges of this
//! process. There is no allowlist and no sandbox.

use super::ToolError;
use crate::llm::{ToolResult, ToolSpec};
use serde::Deserialize;
use serde_json::{Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

/// Name the model uses to call this tool.
pub const BASH_TOOL: &str = "bash";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, or -1 when the process was killed by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// How a command run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Exit code 0.
    Success(CommandResult),
    /// Non-zero exit code.
    Failed(CommandResult),
    /// The command never produced a result (timeout, spawn failure).
    Error(ToolError),
}

impl CommandOutcome {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Error(ToolError::Timeout(_)))
    }

    /// Line(s) shown to the user for this outcome.
    pub fn display(&self) -> String {
        match self {
            Self::Success(result) => format!("✅ Command successful:\n{}\n", result.stdout),
            Self::Failed(result) => format!(
                "❌ Command failed (exit {}):\n{}\n",
                result.exit_code, result.stderr
            ),
            Self::Error(ToolError::Timeout(_)) => "⏰ Command timed out\n".to_string(),
            Self::Error(err) => format!("❌ Error executing command: {err}\n"),
        }
    }

    /// Result block returned to the model for call `tool_use_id`.
    pub fn to_tool_result(&self, tool_use_id: &str) -> ToolResult {
        match self {
            Self::Success(result) | Self::Failed(result) => ToolResult::success(
                tool_use_id,
                format!(
                    "Exit code: {}\nStdout: {}\nStderr: {}",
                    result.exit_code, result.stdout, result.stderr
                ),
            ),
            Self::Error(err) => ToolResult::error(tool_use_id, err.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BashInput {
    command: String,
}

/// Executes shell commands through `sh -c` with a wall-clock limit.
#[derive(Debug, Clone)]
pub struct BashTool {
    timeout: Duration,
}

impl Default for BashTool {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BashTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wall-clock limit for a single command.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Tool definition advertised to the model.
    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: BASH_TOOL.to_string(),
            description: "Execute bash commands on the Proxmox system".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "The bash command to execute"
                    }
                },
                "required": ["command"]
            }),
        }
    }

    /// Extract the command string from a tool call's input.
    pub fn parse_command(input: &Value) -> Result<String, ToolError> {
        BashInput::deserialize(input)
            .map(|input| input.command)
            .map_err(|e| ToolError::InvalidInput(e.to_string()))
    }

    /// Run `command` and classify how it ended.
    pub async fn run(&self, command: &str) -> CommandOutcome {
        info!(command, "executing command");

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => return CommandOutcome::Error(ToolError::Execution(e.to_string())),
        };

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return CommandOutcome::Error(ToolError::Execution(e.to_string())),
            Err(_) => {
                warn!(command, timeout = ?self.timeout, "command timed out");
                return CommandOutcome::Error(ToolError::Timeout(self.timeout.as_secs()));
            }
        };

        let result = CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if output.status.success() {
            CommandOutcome::Success(result)
        } else {
            CommandOutcome::Failed(result)
        }
    }
}
