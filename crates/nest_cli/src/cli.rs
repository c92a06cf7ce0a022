//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Manage project lists and tasks in plain language
#[derive(Parser)]
#[command(name = "nestpilot", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Project to operate on. Uses NESTPILOT_PROJECT if not set.
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Use an in-memory demo project instead of the REST API
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive chat session
    Chat {
        /// Model to use (e.g. gemini-2.5-flash). Uses NESTPILOT_MODEL if not set.
        #[arg(long)]
        model: Option<String>,
        /// Send one message, print the reply and exit
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Inspect and call actions directly
    Actions {
        #[command(subcommand)]
        action: ActionsAction,
    },
    /// Print the project context given to the model
    Context,
}

#[derive(Subcommand)]
pub enum ActionsAction {
    /// List all registered actions
    List,
    /// Show action details and parameter schema
    Info {
        /// Action name
        name: String,
    },
    /// Dispatch an action with JSON arguments
    Call {
        /// Action name
        name: String,
        /// JSON arguments
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}
