//! Human-friendly output implementation using console styling.

use console::style;
use tracing::{debug, instrument, trace};

use crate::device::DeviceDescriptor;
use crate::error::CamkeepError;
use crate::install::{InstallReport, StepOutcome};
use crate::parser::ParsedSettings;
use crate::settings::ControlSettings;
use crate::system::CommandOutput;
use crate::wizard::SetupSummary;

use super::{BuildInfo, Output, ScriptContents};

/// Styled terminal output implementation for human users.
///
/// Colors follow `console`'s global switch, which `main` turns off for
/// `--no-color` and non-terminal stdout.
pub struct HumanOutput {
    quiet: bool,
}

impl HumanOutput {
    #[instrument]
    pub fn new(quiet: bool) -> Self {
        debug!("Creating HumanOutput");
        Self { quiet }
    }

    fn settings_table(settings: &ControlSettings) {
        let width = settings
            .iter()
            .map(|s| s.control.len())
            .max()
            .unwrap_or(0);
        for setting in settings {
            println!(
                "  {:<width$}  {}",
                style(&setting.control).cyan(),
                setting.value
            );
        }
    }
}

impl Output for HumanOutput {
    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {message}", style("[OK]").green().bold());
        }
    }

    #[instrument(skip(self))]
    fn error(&self, error: &CamkeepError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!("{}: {error}", style("Error").red().bold());
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {suggestion}", style("Hint").yellow());
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {message}", style("[WARN]").yellow().bold());
    }

    #[instrument(skip(self, devices), fields(device_count = devices.len()))]
    fn device_list(&self, devices: &[DeviceDescriptor]) {
        if devices.is_empty() {
            trace!("No devices - showing warning");
            self.warning("No video devices found");
            return;
        }
        println!("{}", style("Video devices:").bold());
        for (idx, device) in devices.iter().enumerate() {
            println!(
                "  {}: {} ({})",
                idx + 1,
                style(&device.path).green(),
                device.description
            );
        }
    }

    fn parsed_settings(&self, parsed: &ParsedSettings) {
        println!(
            "{} {} ({} controls)",
            style(parsed.format.display_name()).bold(),
            parsed.path,
            parsed.settings.len()
        );
        Self::settings_table(&parsed.settings);
    }

    fn script_written(&self, path: &str, device: &str, settings: &ControlSettings) {
        self.success(&format!(
            "Restore script written to {path} ({} controls for {device})",
            settings.len()
        ));
    }

    fn script_contents(&self, contents: &ScriptContents) {
        println!("{} {}", style("Restore script").bold(), contents.path);
        if let Some(device) = &contents.device {
            println!("  Device: {}", style(device).green());
        }
        if contents.settings.is_empty() {
            println!("  (no control settings)");
        } else {
            Self::settings_table(&contents.settings);
        }
    }

    fn script_applied(&self, path: &str, output: &CommandOutput) {
        if output.success() {
            self.success(&format!("Applied {path}"));
        } else {
            let status = output
                .status
                .map_or_else(|| "signal".to_string(), |s| s.to_string());
            self.warning(&format!("{path} exited with status {status}"));
            let stderr = output.stderr.trim();
            if !stderr.is_empty() {
                eprintln!("  {}", style(stderr).dim());
            }
        }
    }

    #[instrument(skip_all, fields(steps = report.steps.len()))]
    fn install_report(&self, report: &InstallReport) {
        for step in &report.steps {
            let marker = match step.outcome {
                StepOutcome::Installed { .. } => style("[OK]").green().bold(),
                StepOutcome::Skipped { .. } => style("[SKIP]").yellow().bold(),
                StepOutcome::Failed { .. } => style("[FAIL]").red().bold(),
            };
            println!("{marker} {}", step.summary());
        }
    }

    fn setup_summary(&self, summary: &SetupSummary) {
        // The wizard already narrated each step; only failures need repeating.
        if summary.install.has_failures() {
            self.warning("Some persistence steps failed; see the messages above");
        }
    }

    fn version_info(&self, info: &BuildInfo) {
        println!("{} {}", style("camkeep").bold().cyan(), info.version);
        println!(
            "git: {}{}",
            info.git_sha,
            if info.git_dirty { " (dirty)" } else { "" }
        );
        println!("built: {}", info.build_timestamp);
        println!("rustc: {}", info.rustc_version);
        println!("target: {}", info.target);
    }
}
