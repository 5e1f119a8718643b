//! Interactive setup.
//!
//! The linear flow behind `camkeep setup`: pick a camera, pick a guvcview
//! file, write the restore script, register it, apply it once, and
//! optionally add the boot service. Every answer comes from a [`Prompter`]
//! and every command goes through the injected runner and installer.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::device::{self, DeviceDescriptor};
use crate::error::{CamkeepError, Result};
use crate::install::{InstallReport, InstallStep, Installer};
use crate::parser::{self, SourceFormat};
use crate::prompt::{self, FilePicker, Prompter};
use crate::script;
use crate::system::CommandRunner;

/// What a completed setup did.
#[derive(Debug, Clone, Serialize)]
pub struct SetupSummary {
    pub device: DeviceDescriptor,
    pub settings_file: String,
    pub format: SourceFormat,
    pub controls: usize,
    pub script_path: String,
    /// Exit status of the immediate run, `None` if it could not be started
    pub applied_status: Option<i32>,
    pub install: InstallReport,
}

/// Collaborators the wizard drives.
pub struct Wizard<'a> {
    config: &'a AppConfig,
    runner: &'a dyn CommandRunner,
    installer: Installer<'a>,
    picker: &'a dyn FilePicker,
}

impl<'a> Wizard<'a> {
    pub fn new(
        config: &'a AppConfig,
        runner: &'a dyn CommandRunner,
        installer: Installer<'a>,
        picker: &'a dyn FilePicker,
    ) -> Self {
        Self {
            config,
            runner,
            installer,
            picker,
        }
    }

    /// Run the whole setup.
    ///
    /// Fails before asking for a file when there is no camera, and before
    /// writing anything when the file yields no settings.
    #[instrument(skip_all)]
    pub fn run(&self, prompter: &mut dyn Prompter) -> Result<SetupSummary> {
        let devices =
            device::list_devices(&self.config.device_dir, self.runner, &self.config.control_tool)?;
        if devices.is_empty() {
            return Err(CamkeepError::NoDevicesFound);
        }
        let device = prompt::select_device(prompter, &devices)?.clone();

        let settings_path = prompt::choose_settings_file(prompter, self.picker)?;
        let parsed = parser::parse_file(&settings_path)?;
        if parsed.settings.is_empty() {
            return Err(CamkeepError::NoSettingsFound { path: parsed.path });
        }

        let script_path = &self.config.script_path;
        script::write_script(
            script_path,
            &parsed.settings,
            &device.path,
            &self.config.control_tool,
        )?;
        prompter.say(&format!(
            "Restore script written to {}",
            script_path.display()
        ))?;

        let mut install = InstallReport::default();
        self.record(prompter, &mut install, InstallStep::Autostart, |i| {
            i.autostart(script_path)
        })?;
        self.record(prompter, &mut install, InstallStep::UdevRule, |i| {
            i.udev_rule(&device.path, script_path)
        })?;

        let applied_status = self.apply_now(prompter, script_path)?;

        if prompt::confirm_boot_service(prompter)? {
            self.record(prompter, &mut install, InstallStep::BootService, |i| {
                i.boot_service(script_path)
            })?;
        }

        prompter.say("")?;
        prompter.say(
            "All done! Your webcam settings will now persist at login and when the camera is reconnected.",
        )?;
        prompter.say("To apply settings manually, run:")?;
        prompter.say(&format!("  {}", script_path.display()))?;

        info!(device = %device.path, controls = parsed.settings.len(), "Setup complete");
        Ok(SetupSummary {
            device,
            settings_file: parsed.path,
            format: parsed.format,
            controls: parsed.settings.len(),
            script_path: script_path.display().to_string(),
            applied_status,
            install,
        })
    }

    fn record<F>(
        &self,
        prompter: &mut dyn Prompter,
        report: &mut InstallReport,
        step: InstallStep,
        run: F,
    ) -> Result<()>
    where
        F: FnOnce(&Installer<'a>) -> crate::install::StepOutcome,
    {
        report.push(step, run(&self.installer));
        if let Some(last) = report.steps.last() {
            prompter.say(&last.summary())?;
        }
        Ok(())
    }

    /// Run the script once; problems are reported and setup continues.
    fn apply_now(&self, prompter: &mut dyn Prompter, script_path: &Path) -> Result<Option<i32>> {
        prompter.say(&format!(
            "Applying settings immediately by running: {}",
            script_path.display()
        ))?;
        match script::run_script(self.runner, script_path) {
            Ok(output) => {
                if !output.success() {
                    prompter.say(&format!(
                        "Warning: restore script exited with status {}",
                        output.status.map_or_else(|| "unknown".to_string(), |s| s.to_string())
                    ))?;
                }
                Ok(output.status)
            }
            Err(e) => {
                warn!(error = %e, "Could not run restore script");
                prompter.say(&format!("Warning: {e}"))?;
                Ok(None)
            }
        }
    }
}
