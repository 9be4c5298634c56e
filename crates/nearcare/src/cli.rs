//! Clap derive structures for the `nearcare` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nearcare -- find and rank nearby medical facilities
#[derive(Debug, Parser)]
#[command(
    name = "nearcare",
    version,
    about = "Find and rank nearby medical facilities from the command line",
    long_about = "Queries a fixed directory of medical facilities, ranks it by\n\
        great-circle distance from your position, and filters it by name or\n\
        address. Position comes from an IP-geolocation lookup, explicit\n\
        coordinates, or a configured fixed point.",
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
    /// Config file path (defaults to the platform config dir)
    #[arg(long, env = "NEARCARE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NEARCARE_OUTPUT",
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

    /// Location resolution timeout in seconds (overrides config)
    #[arg(long, env = "NEARCARE_TIMEOUT", global = true)]
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
    /// Plain text, one value per line (scripting)
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
    /// Browse the facility directory
    #[command(alias = "fac", alias = "f")]
    Facilities(FacilitiesArgs),

    /// Rank facilities by distance from a position
    #[command(alias = "near", alias = "n")]
    Nearest(NearestArgs),

    /// Great-circle distance between two coordinates
    #[command(alias = "dist")]
    Distance(DistanceArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Facilities ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FacilitiesArgs {
    #[command(subcommand)]
    pub command: FacilitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FacilitiesCommand {
    /// List the directory in its original order
    #[command(alias = "ls")]
    List {
        /// Case-insensitive substring filter on name or address
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show a single facility by name
    Show {
        /// Facility name (case-insensitive)
        name: String,
    },
}

// ── Nearest ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NearestArgs {
    /// Latitude of the reference position
    #[arg(long, requires = "lng", conflicts_with = "locate")]
    pub lat: Option<f64>,

    /// Longitude of the reference position
    #[arg(long, requires = "lat", conflicts_with = "locate")]
    pub lng: Option<f64>,

    /// Resolve the position via the configured provider
    #[arg(long)]
    pub locate: bool,

    /// Maximum number of results
    #[arg(long, short = 'n', default_value = "5")]
    pub limit: usize,

    /// Case-insensitive substring filter on name or address
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

// ── Distance ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DistanceArgs {
    /// Start coordinate as "lat,lng"
    pub from: String,

    /// End coordinate as "lat,lng"
    pub to: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
