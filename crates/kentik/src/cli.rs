//! Clap derive structures for the `kentik` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// kentik -- idempotent device reconciliation for the Kentik platform
#[derive(Debug, Parser)]
#[command(
    name = "kentik",
    version,
    about = "Reconcile Kentik device resources from the command line",
    long_about = "Converges a single device resource in the Kentik telemetry platform\n\
        to a desired spec: creates it if absent, updates it if drifted,\n\
        deletes it if requested absent, and reconciles label assignments.\n\n\
        Credentials are read from KENTIK_EMAIL and KENTIK_TOKEN (or the\n\
        config file); KENTIK_REGION selects the US or EU portal.",
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
    /// Kentik portal region (US or EU, overrides config)
    #[arg(long, short = 'r', global = true)]
    pub region: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile a device spec against the Kentik platform
    #[command(alias = "a")]
    Apply(ApplyArgs),

    /// Parse and normalize a device spec without contacting the API
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Path to the device spec (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: PathBuf,

    /// Compute and report changes without issuing any mutating call
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the device spec (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: PathBuf,
}
