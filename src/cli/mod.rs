//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::CONFIG_ENV;

/// camkeep - Persist webcam control settings on Linux.
///
/// Reads a guvcview profile or config file, writes a restore script of
/// v4l2-ctl commands, and registers it to run at login, on hot-plug and
/// optionally at boot. Run without a subcommand for the interactive setup.
#[derive(Parser, Debug)]
#[command(name = "camkeep", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "CAMKEEP_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (default: ~/.config/camkeep/config.toml)
    #[arg(long, short = 'c', global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Interactive ===
    /// Interactive setup (the default when no command is given)
    Setup,

    // === Inspection ===
    /// List video capture devices
    List,

    /// Parse a guvcview profile or config file and print its settings
    Parse(ParseArgs),

    /// Show the settings recorded in the restore script
    Show(ScriptArgs),

    // === Non-interactive setup ===
    /// Write the restore script from a guvcview file
    Generate(GenerateArgs),

    /// Run the restore script once
    Apply(ScriptArgs),

    /// Register the restore script for autostart, hot-plug and boot
    Install(InstallArgs),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// guvcview profile (.gpfl) or config file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for commands that operate on an existing restore script.
#[derive(Parser, Debug)]
pub struct ScriptArgs {
    /// Restore script path (default from config)
    #[arg(long, short = 's')]
    pub script: Option<PathBuf>,
}

/// Arguments for writing a restore script.
///
/// # Examples
///
/// ```bash
/// camkeep generate ~/Documents/default.gpfl --device /dev/video0
/// camkeep generate ~/.config/guvcview2/video0 -d /dev/video2 -o ./restore.sh
/// ```
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// guvcview profile (.gpfl) or config file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Device the script targets
    #[arg(long, short = 'd', value_name = "PATH")]
    pub device: String,

    /// Where to write the script (default from config)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Device whose USB ids the udev rule matches
    #[arg(long, short = 'd', value_name = "PATH")]
    pub device: String,

    /// Also register the systemd boot service
    #[arg(long)]
    pub boot: bool,

    /// Restore script path (default from config)
    #[arg(long, short = 's')]
    pub script: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
