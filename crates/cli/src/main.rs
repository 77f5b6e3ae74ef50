mod config;
mod error;
mod prompt;

use clap::{Parser, Subcommand};
use runtime::{AnthropicBackend, Backend, Session};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};
use prompt::SYSTEM_PROMPT;

#[derive(Parser)]
#[command(name = "proxmox-agent")]
#[command(about = "Manage Proxmox VMs by chatting with Claude", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Message to send once; omit to start an interactive session
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    message: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save an Anthropic API key to the config file
    Setup {
        /// Extra words after `setup` are ignored
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        _extra: Vec<String>,
    },
}

/// What a line typed at the interactive prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Exit,
    Clear,
    Empty,
    Message(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            Self::Exit
        } else if line.eq_ignore_ascii_case("clear") {
            Self::Clear
        } else if line.is_empty() {
            Self::Empty
        } else {
            Self::Message(line)
        }
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Setup { .. }) = cli.command {
        return cmd_setup();
    }

    let config = Config::load().ok_or(Error::MissingApiKey)?;
    let backend = AnthropicBackend::builder(config.api_key).build();
    info!(%backend, "starting session");

    let mut session = Session::new(backend)
        .with_system(SYSTEM_PROMPT)
        .on_command(|command| println!("🔧 Executing: {command}"));

    if cli.message.is_empty() {
        cmd_interactive(&mut session).await
    } else {
        let reply = chat_round(&mut session, &cli.message.join(" ")).await;
        println!("{reply}");
        Ok(())
    }
}

fn cmd_setup() -> Result<()> {
    let path = Config::path()?;
    Config::create(&path)?;
    println!("✅ Configuration saved to {}", path.display());
    Ok(())
}

async fn cmd_interactive<B: Backend>(session: &mut Session<B>) -> Result<()> {
    println!("🤖 Proxmox VM Manager - Claude Agent");
    println!("Type 'exit' to quit, 'clear' to clear history");
    println!("{}", "=".repeat(50));

    let mut editor = DefaultEditor::new()?;

    loop {
        println!();
        let line = match editor.readline("🔥 You: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("👋 Goodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        match Input::parse(&line) {
            Input::Exit => {
                println!("👋 Goodbye!");
                break;
            }
            Input::Clear => {
                session.clear();
                println!("🧹 Conversation history cleared");
            }
            Input::Empty => {}
            Input::Message(message) => {
                let _ = editor.add_history_entry(message);
                println!("\n🤖 Claude:");
                println!("{}", chat_round(session, message).await);
            }
        }
    }

    Ok(())
}

/// Run one round and render either outcome as display text.
async fn chat_round<B: Backend>(session: &mut Session<B>, message: &str) -> String {
    match session.chat(message).await {
        Ok(reply) => reply,
        Err(e) => format!("❌ {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_words_are_case_insensitive() {
        assert_eq!(Input::parse("exit"), Input::Exit);
        assert_eq!(Input::parse("  EXIT "), Input::Exit);
        assert_eq!(Input::parse("Clear"), Input::Clear);
        assert_eq!(Input::parse("   "), Input::Empty);
        assert_eq!(Input::parse(" qm list "), Input::Message("qm list"));
        assert_eq!(Input::parse("exit now"), Input::Message("exit now"));
    }

    #[test]
    fn setup_is_a_subcommand() {
        let cli = Cli::try_parse_from(["proxmox-agent", "setup"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Setup { .. })));
        assert!(cli.message.is_empty());
    }

    #[test]
    fn setup_ignores_trailing_words() {
        let cli = Cli::try_parse_from(["proxmox-agent", "setup", "now", "--please"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Setup { .. })));
        assert!(cli.message.is_empty());
    }

    #[test]
    fn other_arguments_form_one_message() {
        let cli = Cli::try_parse_from(["proxmox-agent", "start", "vm", "101"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.message.join(" "), "start vm 101");
    }

    #[test]
    fn no_arguments_means_interactive() {
        let cli = Cli::try_parse_from(["proxmox-agent"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.message.is_empty());
    }
}
