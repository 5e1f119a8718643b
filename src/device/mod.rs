//! Video device discovery.
//!
//! Devices are found by listing `video<N>` nodes in the device directory and
//! described by asking `v4l2-ctl`. USB identity comes from `udevadm`. Both
//! queries go through a [`CommandRunner`], and neither failure stops
//! enumeration.

mod info;

pub use info::{DeviceDescriptor, UNKNOWN_DEVICE, UsbIds};

use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::system::CommandRunner;

/// Returns true for capture node names of the form `video<N>`.
pub fn is_capture_node(name: &str) -> bool {
    name.strip_prefix("video")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// List capture devices in `dev_dir`, sorted by name.
///
/// Each device is described with the first line of `<tool> -d <path> --info`;
/// when that query fails the description is [`UNKNOWN_DEVICE`]. An empty
/// list is not an error.
#[instrument(skip(runner), fields(dev_dir = %dev_dir.display()))]
pub fn list_devices(
    dev_dir: &Path,
    runner: &dyn CommandRunner,
    tool: &str,
) -> Result<Vec<DeviceDescriptor>> {
    let mut names: Vec<String> = std::fs::read_dir(dev_dir)?
        .filter_map(std::result::Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_capture_node(name))
        .collect();
    names.sort();
    debug!(count = names.len(), "Found capture nodes");

    Ok(names
        .into_iter()
        .map(|name| {
            let path = dev_dir.join(&name).display().to_string();
            let description = describe_device(runner, tool, &path);
            DeviceDescriptor { path, description }
        })
        .collect())
}

/// First line of the device-info query, or [`UNKNOWN_DEVICE`].
pub fn describe_device(runner: &dyn CommandRunner, tool: &str, path: &str) -> String {
    match runner.run(tool, &["-d", path, "--info"]) {
        Ok(output) if output.success() => output
            .stdout
            .trim()
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .unwrap_or(UNKNOWN_DEVICE)
            .to_string(),
        Ok(output) => {
            debug!(path, status = ?output.status, "Device info query failed");
            UNKNOWN_DEVICE.to_string()
        }
        Err(e) => {
            debug!(path, error = %e, "Device info query could not run");
            UNKNOWN_DEVICE.to_string()
        }
    }
}

/// Extract vendor/product ids from `udevadm info --query=all` output.
///
/// Lines may carry udev's `E: ` property prefix. The last occurrence of each
/// key wins; empty values count as missing.
pub fn parse_usb_ids(text: &str) -> Option<UsbIds> {
    let mut vendor_id = None;
    let mut product_id = None;

    for line in text.lines() {
        let line = line.trim();
        let line = line.strip_prefix("E:").map_or(line, str::trim_start);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "ID_VENDOR_ID" => vendor_id = Some(value.to_string()),
            "ID_MODEL_ID" => product_id = Some(value.to_string()),
            _ => {}
        }
    }

    match (vendor_id, product_id) {
        (Some(vendor_id), Some(product_id)) if !vendor_id.is_empty() && !product_id.is_empty() => {
            Some(UsbIds {
                vendor_id,
                product_id,
            })
        }
        _ => None,
    }
}

/// Query udev for the device's USB ids. Failures are logged and yield `None`.
#[instrument(skip(runner))]
pub fn usb_ids(runner: &dyn CommandRunner, udevadm: &str, device: &str) -> Option<UsbIds> {
    let name = format!("--name={device}");
    match runner.run_checked(udevadm, &["info", "--query=all", name.as_str()]) {
        Ok(output) => {
            let ids = parse_usb_ids(&output.stdout);
            if ids.is_none() {
                warn!(device, "udev reported no USB vendor/product ids");
            }
            ids
        }
        Err(e) => {
            warn!(device, error = %e, "Could not determine USB IDs");
            None
        }
    }
}
