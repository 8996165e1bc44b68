use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sentry-converge")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Converge Sentry resources to a declared state", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile every resource declared in a manifest
    Apply(ApplyArgs),

    /// Parse a manifest and list its resources without contacting Sentry
    Validate {
        /// Path to the manifest (TOML)
        manifest: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Path to the manifest (TOML)
    pub manifest: PathBuf,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Report what would be done without sending any request
    #[arg(long)]
    pub check: bool,

    /// Print results as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Sentry base URL (e.g. http://localhost:9000)
    #[arg(long, env = "SENTRY_HOST")]
    pub host: Option<String>,

    /// Internal integration token
    #[arg(long, env = "SENTRY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "SENTRY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}
