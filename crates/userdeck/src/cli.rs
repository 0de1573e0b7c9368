//! Clap derive structures for the `userdeck` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// userdeck -- browse a user directory from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "userdeck",
    version,
    about = "Browse a user directory from the command line",
    long_about = "Search, page through and inspect the records served by a user\n\
        directory API (GET <api-url>/usuarios).\n\n\
        Searches match name, surname, profile, interests and email,\n\
        case-insensitively. Results are shown nine to a page.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Directory profile to use
    #[arg(long, short = 'p', env = "USERDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Directory API base URL (overrides profile)
    #[arg(long, short = 'u', env = "USERDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Records per page (overrides profile)
    #[arg(long, env = "USERDECK_PAGE_SIZE", global = true)]
    pub page_size: Option<usize>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "USERDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "USERDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "USERDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one page of users, optionally filtered
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the detail view of one user
    #[command(alias = "get")]
    Show(ShowArgs),

    /// Interactive session: search as you type, page, open details
    Browse(BrowseArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Browsing ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive search over name, surname, profile, interests, email
    #[arg(long, short = 's')]
    pub query: Option<String>,

    /// Page to show (1-based)
    #[arg(long, short = 'n', default_value = "1")]
    pub page: usize,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// User id
    pub id: String,

    /// Restrict the lookup to users matching this search
    #[arg(long, short = 's')]
    pub query: Option<String>,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Search debounce in milliseconds (overrides profile)
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
