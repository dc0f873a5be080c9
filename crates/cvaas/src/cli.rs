//! Clap derive structures for the `cvaas` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cvaas -- workspaces, tags and inventory on CloudVision as-a-Service
#[derive(Debug, Parser)]
#[command(
    name = "cvaas",
    version,
    about = "Manage CloudVision workspaces, tags and inventory from the command line",
    long_about = "A CLI for CloudVision as-a-Service.\n\n\
        Reads a bearer token and a service endpoint from two files, then\n\
        talks to the inventory, workspace and tag resource APIs.",
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
    /// File holding the bearer token (first non-empty line)
    #[arg(long, env = "CVAAS_TOKEN_FILE", value_name = "FILE", global = true)]
    pub token: Option<PathBuf>,

    /// File holding the service endpoint, e.g. www.arista.io:443
    #[arg(long, env = "CVAAS_URL_FILE", value_name = "FILE", global = true)]
    pub url: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Session timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Additional CA certificate (PEM) to trust
    #[arg(long, value_name = "PEM", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Workspace ledger file
    #[arg(long, value_name = "FILE", global = true)]
    pub ledger: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Read resources (devices, workspaces)
    Get(GetArgs),

    /// Create resources (workspaces, tags)
    Create(CreateArgs),

    /// Attach a tag to a device
    Assign(AssignArgs),

    /// Run multi-step processes
    Run(RunArgs),

    /// Inspect the local workspace ledger
    Ledger(LedgerArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Get ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GetArgs {
    #[command(subcommand)]
    pub command: GetCommand,
}

#[derive(Debug, Subcommand)]
pub enum GetCommand {
    /// List the device inventory
    #[command(alias = "device", alias = "dev")]
    Devices(DeviceFilterArgs),

    /// List workspaces, optionally by state
    #[command(alias = "workspace", alias = "ws")]
    Workspaces(WorkspacesArgs),
}

/// Inventory filters. `--mlag` and `--danz` are mutually exclusive.
#[derive(Debug, Clone, Args)]
pub struct DeviceFilterArgs {
    /// Only devices of this model (e.g. cEOSLab)
    #[arg(long)]
    pub model: Option<String>,

    /// Only devices with MLAG enabled
    #[arg(long)]
    pub mlag: bool,

    /// Only devices with DANZ enabled
    #[arg(long)]
    pub danz: bool,
}

#[derive(Debug, Args)]
pub struct WorkspacesArgs {
    /// State filter: UNSPECIFIED, PENDING, SUBMITTED, ABANDONED, CONFLICTS,
    /// ROLLED_BACK, or NONE for all
    #[arg(long, default_value = "NONE")]
    pub state: String,
}

// ── Create ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(subcommand)]
    pub command: CreateCommand,
}

#[derive(Debug, Subcommand)]
pub enum CreateCommand {
    /// Create a workspace (prompts for missing values)
    Workspace(CreateWorkspaceArgs),

    /// Create a tag in a workspace (prompts for missing values)
    Tag(CreateTagArgs),
}

#[derive(Debug, Args)]
pub struct CreateWorkspaceArgs {
    /// Workspace ID
    #[arg(long)]
    pub id: Option<String>,

    /// Workspace display name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreateTagArgs {
    /// Workspace ID
    #[arg(long)]
    pub workspace: Option<String>,

    /// Tag label
    #[arg(long)]
    pub label: Option<String>,

    /// Tag value
    #[arg(long)]
    pub value: Option<String>,

    /// Element type code
    #[arg(long)]
    pub element_type: Option<i32>,

    /// Element subtype code
    #[arg(long)]
    pub element_subtype: Option<i32>,
}

// ── Assign ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AssignArgs {
    #[command(subcommand)]
    pub command: AssignCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssignCommand {
    /// Assign a tag to one device
    Tag(AssignTagArgs),
}

#[derive(Debug, Args)]
pub struct AssignTagArgs {
    /// Workspace ID
    #[arg(long)]
    pub workspace: String,

    /// Device ID (serial number)
    #[arg(long)]
    pub device: String,

    /// Tag label
    #[arg(long)]
    pub label: String,

    /// Tag value
    #[arg(long)]
    pub value: String,

    /// Element type code
    #[arg(long, default_value_t = 1)]
    pub element_type: i32,

    /// Element subtype code
    #[arg(long, default_value_t = 1)]
    pub element_subtype: i32,
}

// ── Run ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(subcommand)]
    pub command: RunCommand,
}

#[derive(Debug, Subcommand)]
pub enum RunCommand {
    /// Create a workspace and a tag, then assign the tag to every device of
    /// the matched model
    Process(ProcessArgs),
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Workspace ID
    #[arg(long)]
    pub workspace: Option<String>,

    /// Workspace display name
    #[arg(long)]
    pub name: Option<String>,

    /// Tag label
    #[arg(long)]
    pub label: Option<String>,

    /// Tag value
    #[arg(long)]
    pub value: Option<String>,

    /// Element type code
    #[arg(long, default_value_t = 1)]
    pub element_type: i32,

    /// Element subtype code
    #[arg(long, default_value_t = 1)]
    pub element_subtype: i32,

    /// Assign the tag to devices of this model
    #[arg(long, default_value = "cEOSLab")]
    pub match_model: String,

    #[command(flatten)]
    pub filter: DeviceFilterArgs,
}

// ── Ledger ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LedgerArgs {
    #[command(subcommand)]
    pub command: LedgerCommand,
}

#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// List workspaces recorded by this CLI
    #[command(alias = "ls")]
    List,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
