//! Desktop-session autostart entry.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{Result, ResultExt};

/// File name of the autostart entry inside the autostart directory.
pub const AUTOSTART_FILE: &str = "restore-webcam-settings.desktop";

/// Render the XDG desktop entry that runs `script` at login.
pub fn render_desktop_entry(script: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Exec={}\n\
         Hidden=false\n\
         NoDisplay=false\n\
         X-GNOME-Autostart-enabled=true\n\
         Name=Restore Webcam Settings\n",
        script.display()
    )
}

/// Write the autostart entry, creating `autostart_dir` if needed.
///
/// Any existing entry is overwritten.
#[instrument(fields(dir = %autostart_dir.display(), script = %script.display()))]
pub fn install_autostart(autostart_dir: &Path, script: &Path) -> Result<PathBuf> {
    fs::create_dir_all(autostart_dir)
        .with_context(|| format!("creating {}", autostart_dir.display()))?;

    let entry = autostart_dir.join(AUTOSTART_FILE);
    fs::write(&entry, render_desktop_entry(script))
        .with_context(|| format!("writing {}", entry.display()))?;
    debug!(path = %entry.display(), "Autostart entry written");
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_desktop_entry() {
        let entry = render_desktop_entry(Path::new("/home/u/.restore-webcam-settings.sh"));
        assert!(entry.starts_with("[Desktop Entry]\nType=Application\n"));
        assert!(entry.contains("\nExec=/home/u/.restore-webcam-settings.sh\n"));
        assert!(entry.contains("\nX-GNOME-Autostart-enabled=true\n"));
        assert!(entry.ends_with("Name=Restore Webcam Settings\n"));
    }

    #[test]
    fn test_install_creates_directory_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("config/autostart");

        let first = install_autostart(&dir, Path::new("/old.sh")).unwrap();
        let second = install_autostart(&dir, Path::new("/new.sh")).unwrap();
        assert_eq!(first, second);
        assert_eq!(second, dir.join(AUTOSTART_FILE));

        let text = fs::read_to_string(&second).unwrap();
        assert!(text.contains("Exec=/new.sh"));
        assert!(!text.contains("/old.sh"));
    }

    #[test]
    fn test_install_into_file_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("autostart");
        fs::write(&blocker, "").unwrap();

        assert!(install_autostart(&blocker, Path::new("/s.sh")).is_err());
    }
}
