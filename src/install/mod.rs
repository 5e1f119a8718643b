//! Persistence installer.
//!
//! Registers the restore script with the three mechanisms that re-apply it:
//! a desktop autostart entry, a udev hot-plug rule and an optional systemd
//! boot service. Steps are independent; a failing step is reported in its
//! [`StepOutcome`] and never prevents the others from running.

mod autostart;
mod systemd;
mod udev;

pub use autostart::{AUTOSTART_FILE, install_autostart, render_desktop_entry};
pub use systemd::{install_unit, render_unit, service_user};
pub use udev::{STAGED_RULE_FILE, install_rule, render_rule};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::device;
use crate::error::Result;
use crate::system::{CommandRunner, Elevator};

/// One registration mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStep {
    Autostart,
    UdevRule,
    BootService,
}

impl InstallStep {
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Autostart => "Autostart entry",
            Self::UdevRule => "udev rule",
            Self::BootService => "Boot service",
        }
    }
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Installed { path: String },
    Skipped { reason: String },
    Failed { reason: String },
}

impl StepOutcome {
    fn installed(path: &Path) -> Self {
        Self::Installed {
            path: path.display().to_string(),
        }
    }

    fn from_result(step: InstallStep, result: Result<PathBuf>) -> Self {
        match result {
            Ok(path) => {
                info!(%step, path = %path.display(), "Installed");
                Self::installed(&path)
            }
            Err(e) => {
                warn!(%step, error = %e, "Installation step failed");
                Self::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub const fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of one step, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: InstallStep,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl StepReport {
    /// One-line description for the terminal.
    pub fn summary(&self) -> String {
        match &self.outcome {
            StepOutcome::Installed { path } => format!("{} installed at {path}", self.step),
            StepOutcome::Skipped { reason } => format!("{} skipped: {reason}", self.step),
            StepOutcome::Failed { reason } => format!("{} failed: {reason}", self.step),
        }
    }
}

/// Outcomes of every step that was attempted, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub steps: Vec<StepReport>,
}

impl InstallReport {
    pub fn push(&mut self, step: InstallStep, outcome: StepOutcome) {
        self.steps.push(StepReport { step, outcome });
    }

    pub fn outcome(&self, step: InstallStep) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|r| r.step == step)
            .map(|r| &r.outcome)
    }

    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|r| r.outcome.is_failed())
    }
}

/// Runs the installation steps against one configuration.
pub struct Installer<'a> {
    config: &'a AppConfig,
    runner: &'a dyn CommandRunner,
    elevator: &'a dyn Elevator,
    login_user: Option<String>,
}

impl<'a> Installer<'a> {
    /// The login user for the boot service defaults to `$USER`.
    pub fn new(
        config: &'a AppConfig,
        runner: &'a dyn CommandRunner,
        elevator: &'a dyn Elevator,
    ) -> Self {
        Self {
            config,
            runner,
            elevator,
            login_user: std::env::var("USER").ok(),
        }
    }

    #[must_use]
    pub fn with_login_user(mut self, user: Option<String>) -> Self {
        self.login_user = user;
        self
    }

    /// Register the desktop autostart entry.
    #[instrument(skip(self), fields(script = %script.display()))]
    pub fn autostart(&self, script: &Path) -> StepOutcome {
        StepOutcome::from_result(
            InstallStep::Autostart,
            install_autostart(&self.config.autostart_dir, script),
        )
    }

    /// Register the hot-plug rule for `device`; skipped when its USB ids
    /// cannot be determined.
    #[instrument(skip(self), fields(script = %script.display()))]
    pub fn udev_rule(&self, device: &str, script: &Path) -> StepOutcome {
        let Some(ids) = device::usb_ids(self.runner, &self.config.udevadm, device) else {
            warn!(device, "USB vendor/product id unavailable, skipping udev rule");
            return StepOutcome::Skipped {
                reason: format!("could not determine USB vendor/product id of {device}"),
            };
        };

        StepOutcome::from_result(
            InstallStep::UdevRule,
            install_rule(
                self.elevator,
                &self.config.udevadm,
                &self.config.staging_dir,
                &self.config.udev_rules_path,
                &ids,
                script,
            ),
        )
    }

    /// Register the boot-time service; skipped when no user is known.
    #[instrument(skip(self), fields(script = %script.display()))]
    pub fn boot_service(&self, script: &Path) -> StepOutcome {
        let Some(user) = service_user(
            self.config.service_user.as_deref(),
            self.login_user.as_deref(),
        ) else {
            warn!("No service user configured and $USER is unset, skipping boot service");
            return StepOutcome::Skipped {
                reason: "no user to run the service as; set service_user in the config".to_string(),
            };
        };

        StepOutcome::from_result(
            InstallStep::BootService,
            install_unit(self.elevator, self.config, script, &user),
        )
    }

    /// Autostart and udev rule, plus the boot service when `boot` is set.
    pub fn install_all(&self, device: &str, script: &Path, boot: bool) -> InstallReport {
        let mut report = InstallReport::default();
        report.push(InstallStep::Autostart, self.autostart(script));
        report.push(InstallStep::UdevRule, self.udev_rule(device, script));
        if boot {
            report.push(InstallStep::BootService, self.boot_service(script));
        }
        report
    }
}
