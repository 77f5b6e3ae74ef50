//! CLI error types.

use crate::config::ConfigError;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Neither the config file nor the environment holds a key.
    #[error("No API key found. Run 'proxmox-agent setup' to configure.")]
    MissingApiKey,

    /// The config file could not be located, read, or written.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The line editor failed for a reason other than Ctrl-C or EOF.
    #[error("input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub type Result<T> = std::result::Result<T, Error>;
