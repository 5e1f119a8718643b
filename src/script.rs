//! Restore script generation.
//!
//! The restore script is the artifact every persistence mechanism points at:
//!
//! ```text
//! #!/bin/bash
//! v4l2-ctl -d /dev/video0 -c brightness=128
//! v4l2-ctl -d /dev/video0 -c contrast=-5
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::{CamkeepError, Result};
use crate::settings::ControlSettings;
use crate::system::{CommandOutput, CommandRunner};

pub const SHEBANG: &str = "#!/bin/bash";

/// Permission bits of the written script.
pub const SCRIPT_MODE: u32 = 0o755;

/// Render the script text: the shebang, then one control-set per setting.
///
/// Values come verbatim from the source file, so any argument containing
/// characters outside a conservative safe set is single-quoted.
pub fn render_script(settings: &ControlSettings, device: &str, tool: &str) -> String {
    let mut script = String::with_capacity(32 + settings.len() * 48);
    script.push_str(SHEBANG);
    script.push('\n');
    let device = shell_quote(device);
    for setting in settings {
        let assignment = format!("{}={}", setting.control, setting.value);
        script.push_str(&format!(
            "{tool} -d {device} -c {}\n",
            shell_quote(&assignment)
        ));
    }
    script
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ',' | ':' | '+' | '=' | '/' | '@')
}

/// Quote `arg` for a POSIX shell when it is not made of safe characters.
pub fn shell_quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_shell_safe) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Split a script line into words, undoing [`shell_quote`].
///
/// Handles single quotes and backslash escapes outside quotes, which is all
/// the generator emits.
pub fn shell_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    current.push(q);
                }
            }
            '\\' => {
                in_word = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// Write the restore script to `path`, replacing any existing file.
///
/// Failure is returned as [`CamkeepError::ScriptWrite`]; the caller is
/// expected to stop, since nothing else works without the script.
#[instrument(skip(settings), fields(path = %path.display(), controls = settings.len()))]
pub fn write_script(
    path: &Path,
    settings: &ControlSettings,
    device: &str,
    tool: &str,
) -> Result<()> {
    let body = render_script(settings, device, tool);
    let write_err = |source| CamkeepError::ScriptWrite {
        path: path.display().to_string(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(body.as_bytes()).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE)).map_err(write_err)?;

    info!(bytes = body.len(), "Restore script written");
    Ok(())
}

/// Recover the settings a restore script applies.
///
/// Recognizes lines of the form `<tool> -d <device> -c <control>=<value>`;
/// anything else is ignored.
pub fn parse_script(text: &str) -> ControlSettings {
    let mut settings = ControlSettings::new();
    for line in text.lines() {
        let words = shell_words(line);
        let Some(pos) = words.iter().position(|w| w == "-c") else {
            continue;
        };
        if let Some((control, value)) = words.get(pos + 1).and_then(|w| w.split_once('=')) {
            if !control.is_empty() {
                settings.insert(control, value);
            }
        }
    }
    settings
}

/// Device path named by the script's first control-set line.
pub fn script_device(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let words = shell_words(line);
        let pos = words.iter().position(|w| w == "-d")?;
        words.get(pos + 1).cloned()
    })
}

/// Read and parse an existing restore script.
pub fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CamkeepError::ScriptNotFound {
                path: path.display().to_string(),
            }
        } else {
            CamkeepError::Io(e)
        }
    })
}

/// Execute the restore script once.
///
/// A script that runs but exits non-zero (for example a control the camera
/// rejects) is logged and returned, not treated as an error.
#[instrument(skip(runner), fields(path = %path.display()))]
pub fn run_script(runner: &dyn CommandRunner, path: &Path) -> Result<CommandOutput> {
    if !path.is_file() {
        return Err(CamkeepError::ScriptNotFound {
            path: path.display().to_string(),
        });
    }
    let program = path.to_string_lossy();
    let output = runner.run(&program, &[])?;
    if output.success() {
        debug!("Restore script applied");
    } else {
        warn!(
            status = ?output.status,
            stderr = %output.stderr.trim(),
            "Restore script reported errors"
        );
    }
    Ok(output)
}
