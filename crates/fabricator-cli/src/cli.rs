//! CLI argument parsing and command definitions.
//!
//! Global flags cover configuration and verbosity; subcommands are
//! `resolve`, `config` and `version`.

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "fabricator", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "FABRICATOR_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a path or manifest into named units.
    Resolve(ResolveArgs),

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Arguments for `fabricator resolve`.
#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    /// File or directory to resolve.
    #[arg(conflicts_with = "manifest", required_unless_present = "manifest")]
    pub path: Option<String>,

    /// JSON or TOML manifest describing the stack.
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// Directory relative paths are resolved against.
    #[arg(short, long)]
    pub source: Option<String>,

    /// Load directories through their index file instead of walking them.
    #[arg(long)]
    pub no_recursive: bool,

    /// Name forced onto every resolved unit.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Also construct each unit and print its properties.
    #[arg(long)]
    pub construct: bool,

    /// List the entries that were skipped.
    #[arg(long)]
    pub explain: bool,

    /// Output format (defaults to the configured one).
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "resolver.extension").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "resolver.recursive").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
