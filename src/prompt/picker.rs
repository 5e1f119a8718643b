//! Graphical file selection.

use std::path::PathBuf;

use tracing::warn;

use crate::parser::PROFILE_EXTENSION;

/// Lets the user choose a settings file; `None` means nothing was chosen.
pub trait FilePicker {
    fn pick(&self) -> Option<PathBuf>;
}

/// Dialog filters, in the order offered. guvcview names its config files
/// after the device (`video0`) with no extension, so the unfiltered view
/// comes first.
pub const DIALOG_FILTERS: &[(&str, &[&str])] = &[
    ("All files", &["*"]),
    ("GUVCView profiles", &[PROFILE_EXTENSION, "conf"]),
];

/// Native file dialog, through the desktop portal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogPicker;

#[cfg(feature = "file-picker")]
impl FilePicker for DialogPicker {
    fn pick(&self) -> Option<PathBuf> {
        tracing::debug!("Opening file dialog");
        let dialog = DIALOG_FILTERS.iter().fold(
            rfd::FileDialog::new().set_title("Select GUVCView config or profile file"),
            |dialog, (name, extensions)| dialog.add_filter(*name, *extensions),
        );
        let picked = dialog.pick_file();
        tracing::debug!(picked = ?picked, "File dialog closed");
        picked
    }
}

#[cfg(not(feature = "file-picker"))]
impl FilePicker for DialogPicker {
    fn pick(&self) -> Option<PathBuf> {
        NoPicker.pick()
    }
}

/// Picker for builds or sessions without a graphical environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPicker;

impl FilePicker for NoPicker {
    fn pick(&self) -> Option<PathBuf> {
        warn!(
            "File dialog is not available; enter the path manually (the `.{PROFILE_EXTENSION}` or config file)"
        );
        None
    }
}
