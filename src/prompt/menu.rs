//! The wizard's numbered menus.

use std::path::PathBuf;

use tracing::{debug, instrument};

use super::{FilePicker, Prompter};
use crate::config::{expand_user, validate_settings_file};
use crate::device::DeviceDescriptor;
use crate::error::Result;

const INVALID_SELECTION: &str = "Invalid selection, try again.";

pub const BOOT_SERVICE_QUESTION: &str = "Would you like to also set up a systemd service to apply settings at system boot (before login)?";

const MANUAL_PATH_PROMPT: &str = "Enter the full path to your GUVCView config file (e.g. ~/.config/guvcview2/video0 or ~/Documents/default.gpfl): ";

/// Show the numbered device list and return the chosen entry.
///
/// Re-asks until the answer is a number in range.
#[instrument(skip_all, fields(count = devices.len()))]
pub fn select_device<'a>(
    prompter: &mut dyn Prompter,
    devices: &'a [DeviceDescriptor],
) -> Result<&'a DeviceDescriptor> {
    prompter.say("Select the camera to apply settings to:")?;
    for (idx, device) in devices.iter().enumerate() {
        prompter.say(&format!("{}: {device}", idx + 1))?;
    }

    loop {
        let answer = prompter.ask("Enter the number of your choice: ")?;
        let choice = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| devices.get(idx));
        match choice {
            Some(device) => {
                debug!(path = %device.path, "Device selected");
                return Ok(device);
            }
            None => prompter.say(INVALID_SELECTION)?,
        }
    }
}

/// Ask how to find the settings file, then get an existing file's path
/// either typed in (with `~` expansion) or from the picker.
#[instrument(skip_all)]
pub fn choose_settings_file(
    prompter: &mut dyn Prompter,
    picker: &dyn FilePicker,
) -> Result<PathBuf> {
    prompter.say("")?;
    prompter.say("How would you like to select the GUVCView config file?")?;
    prompter.say("1: Enter the path manually")?;
    prompter.say("2: Open file explorer to select the file")?;

    loop {
        match prompter.ask("Enter 1 or 2: ")?.as_str() {
            "1" => return ask_for_path(prompter),
            "2" => match picker.pick().filter(|p| p.is_file()) {
                Some(path) => {
                    prompter.say(&format!("Selected: {}", path.display()))?;
                    return Ok(path);
                }
                None => prompter.say("No file selected. Please try again.")?,
            },
            _ => prompter.say(INVALID_SELECTION)?,
        }
    }
}

fn ask_for_path(prompter: &mut dyn Prompter) -> Result<PathBuf> {
    loop {
        let answer = prompter.ask(MANUAL_PATH_PROMPT)?;
        let path = expand_user(&answer)?;
        match validate_settings_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Settings file entered");
                return Ok(path);
            }
            Err(e) => {
                debug!(error = %e, "Rejected settings path");
                prompter.say("File not found, try again.")?;
            }
        }
    }
}

/// Ask whether to register the boot service. Only `1` means yes.
pub fn confirm_boot_service(prompter: &mut dyn Prompter) -> Result<bool> {
    prompter.say("")?;
    prompter.say(BOOT_SERVICE_QUESTION)?;
    prompter.say("1: Yes")?;
    prompter.say("2: No")?;
    Ok(prompter.ask("Enter 1 or 2: ")? == "1")
}
