//! udev hot-plug rule.
//!
//! The rule is rendered for the camera's USB vendor/product pair, staged as
//! an unprivileged temp file and moved into place by the elevator.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::device::UsbIds;
use crate::error::{Result, ResultExt};
use crate::system::Elevator;

/// Name of the staged rule file.
pub const STAGED_RULE_FILE: &str = "99-webcam-settings.rules";

/// Render the single-line rule that runs `script` when the camera is added.
pub fn render_rule(ids: &UsbIds, script: &Path) -> String {
    format!(
        "ACTION==\"add\", SUBSYSTEM==\"video4linux\", ATTRS{{idVendor}}==\"{}\", ATTRS{{idProduct}}==\"{}\", RUN+=\"{}\"\n",
        ids.vendor_id,
        ids.product_id,
        script.display()
    )
}

/// Stage, move into place and activate the rule.
///
/// Stops at the first failing command.
#[instrument(skip(elevator), fields(ids = %ids, rules_path = %rules_path.display()))]
pub fn install_rule(
    elevator: &dyn Elevator,
    udevadm: &str,
    staging_dir: &Path,
    rules_path: &Path,
    ids: &UsbIds,
    script: &Path,
) -> Result<PathBuf> {
    let staged = staging_dir.join(STAGED_RULE_FILE);
    fs::write(&staged, render_rule(ids, script))
        .with_context(|| format!("staging {}", staged.display()))?;

    let staged_arg = staged.to_string_lossy().into_owned();
    let target_arg = rules_path.to_string_lossy().into_owned();
    elevator.run_elevated("mv", &[staged_arg.as_str(), target_arg.as_str()])?;
    elevator.run_elevated(udevadm, &["control", "--reload-rules"])?;
    elevator.run_elevated(udevadm, &["trigger"])?;

    info!("udev rule installed");
    Ok(rules_path.to_path_buf())
}
