//! Path helpers for user-entered and configured paths.
//!
//! Supports absolute paths, paths relative to a base directory, and "~" home
//! directory expansion.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{CamkeepError, Result};

/// Resolve a path.
///
/// Resolution rules:
/// 1. Paths starting with `~`: expanded to home directory
/// 2. Absolute paths: used as-is
/// 3. Relative paths: resolved against `base_dir`
pub fn resolve_path(path: &Path, base_dir: &Path) -> Result<PathBuf> {
    trace!(
        path = %path.display(),
        base_dir = %base_dir.display(),
        "Resolving path"
    );

    if let Some(expanded) = expand_home(path)? {
        return Ok(expanded);
    }

    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let resolved = base_dir.join(path);
    debug!(
        original = %path.display(),
        resolved = %resolved.display(),
        "Resolved relative path"
    );
    Ok(resolved)
}

/// Expand a leading `~` or `~/`; returns `None` for other paths.
pub fn expand_home(path: &Path) -> Result<Option<PathBuf>> {
    let path_str = path.to_string_lossy();
    if path_str != "~" && !path_str.starts_with("~/") {
        return Ok(None);
    }

    let home = home_dir()?;
    let rest = path_str.strip_prefix("~/").unwrap_or("");
    let resolved = if rest.is_empty() { home } else { home.join(rest) };
    debug!(
        original = %path.display(),
        resolved = %resolved.display(),
        "Expanded home directory path"
    );
    Ok(Some(resolved))
}

/// Expand `~` in a user-entered path, leaving other paths untouched.
pub fn expand_user(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    Ok(expand_home(path)?.unwrap_or_else(|| path.to_path_buf()))
}

/// Resolve the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        CamkeepError::ConfigInvalid("Could not determine home directory".to_string())
    })
}

/// Validate that a path exists and is a regular file.
pub fn validate_settings_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CamkeepError::SettingsFileNotFound {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_path() {
        let base = Path::new("/some/config/dir");
        let path = Path::new("/etc/udev/rules.d/99-webcam-settings.rules");

        let resolved = resolve_path(path, base).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/udev/rules.d/99-webcam-settings.rules"));
    }

    #[test]
    fn test_relative_path() {
        let base = Path::new("/home/user/.config/camkeep");
        let path = Path::new("restore.sh");

        let resolved = resolve_path(path, base).unwrap();
        assert_eq!(resolved, PathBuf::from("/home/user/.config/camkeep/restore.sh"));
    }

    #[test]
    fn test_home_expansion() {
        let resolved = resolve_path(Path::new("~/.restore-webcam-settings.sh"), Path::new("/x")).unwrap();

        let home = home_dir().unwrap();
        assert!(resolved.starts_with(&home));
        assert!(resolved.ends_with(".restore-webcam-settings.sh"));
    }

    #[test]
    fn test_home_only() {
        let resolved = resolve_path(Path::new("~"), Path::new("/x")).unwrap();
        assert_eq!(resolved, home_dir().unwrap());
    }

    #[test]
    fn test_tilde_user_is_not_expanded() {
        assert_eq!(expand_home(Path::new("~bob/file")).unwrap(), None);
        assert_eq!(expand_user("~bob/file").unwrap(), PathBuf::from("~bob/file"));
    }

    #[test]
    fn test_expand_user_plain_path() {
        assert_eq!(
            expand_user("/home/u/default.gpfl").unwrap(),
            PathBuf::from("/home/u/default.gpfl")
        );
    }

    #[test]
    fn test_validate_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("video0");
        File::create(&path).unwrap();

        assert!(validate_settings_file(&path).is_ok());
    }

    #[test]
    fn test_validate_missing_file() {
        let result = validate_settings_file(Path::new("/nonexistent/default.gpfl"));
        assert!(matches!(result, Err(CamkeepError::SettingsFileNotFound { .. })));
    }

    #[test]
    fn test_validate_directory_not_file() {
        let temp = TempDir::new().unwrap();
        let result = validate_settings_file(temp.path());
        assert!(matches!(result, Err(CamkeepError::SettingsFileNotFound { .. })));
    }
}
