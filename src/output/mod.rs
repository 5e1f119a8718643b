//! Output mode abstraction for robot and human output.

use serde::Serialize;

use crate::cli::Cli;
use crate::device::DeviceDescriptor;
use crate::error::CamkeepError;
use crate::install::InstallReport;
use crate::parser::ParsedSettings;
use crate::settings::ControlSettings;
use crate::system::CommandOutput;
use crate::wizard::SetupSummary;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON output for scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human { quiet: bool },
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human { quiet: cli.quiet }
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { quiet } => Box::new(HumanOutput::new(quiet)),
        }
    }
}

/// Build metadata shown by `camkeep version`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub git_dirty: bool,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
    pub target: &'static str,
}

/// Settings recorded in an existing restore script.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptContents {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    pub settings: ControlSettings,
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &CamkeepError);
    fn warning(&self, message: &str);

    // Devices and settings
    fn device_list(&self, devices: &[DeviceDescriptor]);
    fn parsed_settings(&self, parsed: &ParsedSettings);

    // Restore script
    fn script_written(&self, path: &str, device: &str, settings: &ControlSettings);
    fn script_contents(&self, contents: &ScriptContents);
    fn script_applied(&self, path: &str, output: &CommandOutput);

    // Persistence
    fn install_report(&self, report: &InstallReport);
    fn setup_summary(&self, summary: &SetupSummary);

    // Metadata
    fn version_info(&self, info: &BuildInfo);
}
