//! Runtime configuration.
//!
//! All fixed locations and external tool names used by camkeep can be
//! overridden from an optional TOML file. [`AppConfig`] is the resolved
//! form that the rest of the crate consumes.

mod loader;
mod path;
mod schema;

pub use loader::{CONFIG_ENV, default_config_path, load_config, load_config_from_str};
pub use path::{expand_home, expand_user, home_dir, resolve_path, validate_settings_file};
pub use schema::ConfigFile;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

pub const DEFAULT_SCRIPT_PATH: &str = "~/.restore-webcam-settings.sh";
pub const DEFAULT_DEVICE_DIR: &str = "/dev";
pub const DEFAULT_AUTOSTART_DIR: &str = "~/.config/autostart";
pub const DEFAULT_UDEV_RULES_PATH: &str = "/etc/udev/rules.d/99-webcam-settings.rules";
pub const DEFAULT_SYSTEMD_UNIT_DIR: &str = "/etc/systemd/system";
pub const DEFAULT_SERVICE_NAME: &str = "restore-webcam-settings";
pub const DEFAULT_ELEVATE_COMMAND: &str = "sudo";
pub const DEFAULT_CONTROL_TOOL: &str = "v4l2-ctl";
pub const DEFAULT_UDEVADM: &str = "udevadm";
pub const DEFAULT_SYSTEMCTL: &str = "systemctl";

/// Resolved configuration with every path expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub script_path: PathBuf,
    pub device_dir: PathBuf,
    pub autostart_dir: PathBuf,
    pub udev_rules_path: PathBuf,
    pub systemd_unit_dir: PathBuf,
    pub service_name: String,
    pub service_user: Option<String>,
    pub staging_dir: PathBuf,
    pub elevate_command: String,
    pub control_tool: String,
    pub udevadm: String,
    pub systemctl: String,
}

impl AppConfig {
    /// Built-in defaults.
    pub fn defaults() -> Result<Self> {
        Self::from_file(ConfigFile::default(), Path::new("/"))
    }

    /// Fill unset keys with defaults and resolve paths against `base_dir`.
    pub fn from_file(file: ConfigFile, base_dir: &Path) -> Result<Self> {
        let path = |value: Option<PathBuf>, default: &str| -> Result<PathBuf> {
            let value = value.unwrap_or_else(|| PathBuf::from(default));
            resolve_path(&value, base_dir)
        };

        Ok(Self {
            script_path: path(file.script_path, DEFAULT_SCRIPT_PATH)?,
            device_dir: path(file.device_dir, DEFAULT_DEVICE_DIR)?,
            autostart_dir: path(file.autostart_dir, DEFAULT_AUTOSTART_DIR)?,
            udev_rules_path: path(file.udev_rules_path, DEFAULT_UDEV_RULES_PATH)?,
            systemd_unit_dir: path(file.systemd_unit_dir, DEFAULT_SYSTEMD_UNIT_DIR)?,
            service_name: file
                .service_name
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            service_user: file.service_user.filter(|u| !u.trim().is_empty()),
            staging_dir: match file.staging_dir {
                Some(dir) => resolve_path(&dir, base_dir)?,
                None => std::env::temp_dir(),
            },
            elevate_command: file
                .elevate_command
                .unwrap_or_else(|| DEFAULT_ELEVATE_COMMAND.to_string()),
            control_tool: file
                .control_tool
                .unwrap_or_else(|| DEFAULT_CONTROL_TOOL.to_string()),
            udevadm: file.udevadm.unwrap_or_else(|| DEFAULT_UDEVADM.to_string()),
            systemctl: file
                .systemctl
                .unwrap_or_else(|| DEFAULT_SYSTEMCTL.to_string()),
        })
    }

    /// `<service_name>.service`
    pub fn service_unit_name(&self) -> String {
        format!("{}.service", self.service_name)
    }

    /// Full path of the installed systemd unit.
    pub fn service_unit_path(&self) -> PathBuf {
        self.systemd_unit_dir.join(self.service_unit_name())
    }
}
