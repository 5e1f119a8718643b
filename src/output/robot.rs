//! Robot mode JSON output implementation.

use serde::Serialize;
use tracing::{debug, error, instrument, trace};

use crate::device::DeviceDescriptor;
use crate::error::CamkeepError;
use crate::install::InstallReport;
use crate::parser::ParsedSettings;
use crate::settings::ControlSettings;
use crate::system::CommandOutput;
use crate::wizard::SetupSummary;

use super::{BuildInfo, Output, RobotFormat, ScriptContents};

/// JSON output implementation for scripting.
///
/// Results go to stdout, errors to stderr, one JSON document per call.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match json {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                Some(json)
            }
            Err(e) => {
                error!(error = %e, "JSON serialization failed");
                None
            }
        }
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            println!("{json}");
        }
    }

    /// Output JSON to stderr.
    fn output_json_stderr<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            eprintln!("{json}");
        }
    }
}

impl Output for RobotOutput {
    fn success(&self, message: &str) {
        self.output_json(&serde_json::json!({ "success": true, "message": message }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &CamkeepError) {
        debug!(error = %error, "Robot: error");
        self.output_json_stderr(&serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        }));
    }

    fn warning(&self, message: &str) {
        self.output_json(&serde_json::json!({ "warning": true, "message": message }));
    }

    #[instrument(skip(self, devices), fields(count = devices.len()))]
    fn device_list(&self, devices: &[DeviceDescriptor]) {
        debug!("Robot: device_list");
        self.output_json(devices);
    }

    fn parsed_settings(&self, parsed: &ParsedSettings) {
        self.output_json(parsed);
    }

    fn script_written(&self, path: &str, device: &str, settings: &ControlSettings) {
        self.output_json(&serde_json::json!({
            "script": path,
            "device": device,
            "settings": settings,
            "ok": true,
        }));
    }

    fn script_contents(&self, contents: &ScriptContents) {
        self.output_json(contents);
    }

    fn script_applied(&self, path: &str, output: &CommandOutput) {
        self.output_json(&serde_json::json!({
            "script": path,
            "ok": output.success(),
            "status": output.status,
            "stderr": output.stderr,
        }));
    }

    #[instrument(skip_all, fields(steps = report.steps.len()))]
    fn install_report(&self, report: &InstallReport) {
        debug!("Robot: install_report");
        self.output_json(&serde_json::json!({
            "ok": !report.has_failures(),
            "steps": report.steps,
        }));
    }

    fn setup_summary(&self, summary: &SetupSummary) {
        self.output_json(summary);
    }

    fn version_info(&self, info: &BuildInfo) {
        self.output_json(info);
    }
}
