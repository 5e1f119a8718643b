//! On-disk configuration file format.
//!
//! Every key is optional; omitted keys take the built-in defaults from
//! [`super::AppConfig`].
//!
//! ```toml
//! script_path = "~/.restore-webcam-settings.sh"
//! elevate_command = "pkexec"
//! service_user = "alice"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Where the restore script is written
    pub script_path: Option<PathBuf>,
    /// Directory scanned for `video<N>` nodes
    pub device_dir: Option<PathBuf>,
    /// Desktop autostart directory
    pub autostart_dir: Option<PathBuf>,
    /// Installed udev rule file
    pub udev_rules_path: Option<PathBuf>,
    /// Directory receiving the systemd unit
    pub systemd_unit_dir: Option<PathBuf>,
    /// Unit name without the `.service` suffix
    pub service_name: Option<String>,
    /// Account the boot service runs as (defaults to `$USER`)
    pub service_user: Option<String>,
    /// Where rule and unit files are staged before elevation
    pub staging_dir: Option<PathBuf>,
    /// Privilege helper; empty runs system steps directly
    pub elevate_command: Option<String>,
    /// Control tool used for queries and in the restore script
    pub control_tool: Option<String>,
    pub udevadm: Option<String>,
    pub systemctl: Option<String>,
}
