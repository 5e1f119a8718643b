//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::AppConfig;
use super::schema::ConfigFile;
use crate::error::{CamkeepError, Result};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "CAMKEEP_CONFIG";

/// `<config dir>/camkeep/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("camkeep").join("config.toml"))
}

/// Load the configuration.
///
/// An explicit path (from `--config` or `CAMKEEP_CONFIG`) must exist. The
/// default location is optional: when it is absent, built-in defaults apply.
#[instrument]
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let (path, required) = match explicit {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (default_config_path(), false),
    };

    let Some(path) = path else {
        debug!("No configuration directory, using defaults");
        return AppConfig::from_file(ConfigFile::default(), Path::new("/"));
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return AppConfig::from_file(ConfigFile::default(), Path::new("/"));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CamkeepError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(CamkeepError::Io(e)),
    };

    let base_dir = path.parent().unwrap_or_else(|| Path::new("/"));
    let config = load_config_from_str(&content, base_dir)?;
    info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parse configuration text; relative paths resolve against `base_dir`.
pub fn load_config_from_str(content: &str, base_dir: &Path) -> Result<AppConfig> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| CamkeepError::ConfigParse(format!("TOML: {e}")))?;
    debug!(?file, "Parsed configuration file");
    AppConfig::from_file(file, base_dir)
}
