//! Readers for guvcview exports.
//!
//! guvcview writes two unrelated formats: control profiles (`.gpfl`,
//! label/value pairs) and per-device config files (`key=value`). The format
//! is decided from the file name and the first line only.

mod config;
mod profile;

pub use config::{canonical_value, parse_config};
pub use profile::{PROFILE_MAGIC, parse_profile, value_token};

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{CamkeepError, Result};
use crate::settings::ControlSettings;

/// File extension of guvcview control profiles.
pub const PROFILE_EXTENSION: &str = "gpfl";

/// Which guvcview export a file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// `.gpfl` control profile: `#Label` comments followed by `=VAL{n}` lines
    Profile,
    /// Config file: `key=value` lines
    Config,
}

impl SourceFormat {
    /// Decide the format from the path's extension and the file's first line.
    pub fn detect(path: &Path, first_line: &str) -> Self {
        let is_profile_ext = path
            .extension()
            .is_some_and(|ext| ext == PROFILE_EXTENSION);
        if is_profile_ext || first_line.starts_with(PROFILE_MAGIC) {
            Self::Profile
        } else {
            Self::Config
        }
    }

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Profile => "GUVCView profile",
            Self::Config => "GUVCView config",
        }
    }
}

/// Settings recovered from one file.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedSettings {
    pub path: String,
    pub format: SourceFormat,
    pub settings: ControlSettings,
}

/// Parse already-loaded text according to its detected format.
pub fn parse_str(path: &Path, text: &str) -> (SourceFormat, ControlSettings) {
    let first_line = text.lines().next().unwrap_or("");
    let format = SourceFormat::detect(path, first_line);
    let settings = match format {
        SourceFormat::Profile => parse_profile(text),
        SourceFormat::Config => parse_config(text),
    };
    (format, settings)
}

/// Read and parse a guvcview profile or config file.
///
/// Returns an empty mapping when nothing recognizable was found; only an
/// unreadable file is an error. Invalid UTF-8 is decoded lossily.
#[instrument(fields(path = %path.display()))]
pub fn parse_file(path: &Path) -> Result<ParsedSettings> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CamkeepError::SettingsFileNotFound {
                path: path.display().to_string(),
            }
        } else {
            CamkeepError::Io(e)
        }
    })?;
    debug!(bytes = bytes.len(), "Read settings file");

    let text = String::from_utf8_lossy(&bytes);
    let (format, settings) = parse_str(path, &text);
    info!(?format, controls = settings.len(), "Parsed settings file");

    Ok(ParsedSettings {
        path: path.display().to_string(),
        format,
        settings,
    })
}
