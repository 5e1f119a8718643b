//! systemd oneshot unit for applying settings at boot.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::error::{Result, ResultExt};
use crate::system::Elevator;

/// Render the unit that runs `script` once as `user` during boot.
pub fn render_unit(script: &Path, user: &str) -> String {
    format!(
        "[Unit]\n\
         Description=Restore webcam settings at boot\n\
         After=network.target\n\
         \n\
         [Service]\n\
         Type=oneshot\n\
         ExecStart={}\n\
         User={user}\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        script.display()
    )
}

/// Pick the account the service runs as: the configured user, else the
/// login user.
pub fn service_user(configured: Option<&str>, login: Option<&str>) -> Option<String> {
    configured
        .or(login)
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(ToString::to_string)
}

/// Stage the unit, move it into the unit directory, reload and enable it.
#[instrument(skip(elevator, config), fields(unit = %config.service_unit_name()))]
pub fn install_unit(
    elevator: &dyn Elevator,
    config: &AppConfig,
    script: &Path,
    user: &str,
) -> Result<PathBuf> {
    let unit_name = config.service_unit_name();
    let staged = config.staging_dir.join(&unit_name);
    fs::write(&staged, render_unit(script, user))
        .with_context(|| format!("staging {}", staged.display()))?;

    let target = config.service_unit_path();
    let staged_arg = staged.to_string_lossy().into_owned();
    let target_arg = target.to_string_lossy().into_owned();
    elevator.run_elevated("mv", &[staged_arg.as_str(), target_arg.as_str()])?;
    elevator.run_elevated(&config.systemctl, &["daemon-reload"])?;
    elevator.run_elevated(&config.systemctl, &["enable", unit_name.as_str()])?;

    info!(user, "Boot service enabled");
    Ok(target)
}
