//! guvcview profile (`.gpfl`) parser.
//!
//! A profile lists each control as a `#<Label>` comment followed by a line
//! carrying `=VAL{<n>}`:
//!
//! ```text
//! #V4L2/CTRL/0.0.2
//! APP{"guvcview"}
//! #Brightness
//! ID{0x00980900};CHK{-64:64:1:0}=VAL{12}
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::controls;
use crate::settings::ControlSettings;

/// First-line marker of a guvcview profile.
pub const PROFILE_MAGIC: &str = "#V4L2/CTRL";

/// Any line containing this consumes the pending label, even if its value
/// is not an integer.
const VALUE_MARKER: &str = "=VAL{";

static VALUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=VAL\{(-?\d+)\}").expect("VAL pattern is valid"));

/// Extract the integer text of a `=VAL{...}` token, if the line has one.
pub fn value_token(line: &str) -> Option<&str> {
    VALUE_TOKEN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse profile text into canonical settings.
///
/// Each label is consumed by the next `=VAL{` line, whether or not the label
/// maps to a known control or the value parses. Unknown labels, malformed
/// values and orphan values are dropped.
pub fn parse_profile(text: &str) -> ControlSettings {
    let mut settings = ControlSettings::new();
    let mut pending_label: Option<&str> = None;

    for line in text.lines().map(str::trim) {
        if line.starts_with('#') {
            if !line.starts_with(PROFILE_MAGIC) {
                pending_label = Some(line.trim_start_matches('#').trim());
            }
            continue;
        }

        let Some(label) = pending_label else {
            continue;
        };
        if !line.contains(VALUE_MARKER) {
            continue;
        }
        pending_label = None;

        let Some(value) = value_token(line) else {
            trace!(label, line, "Dropping malformed profile value");
            continue;
        };
        match controls::from_profile_label(label) {
            Some(control) => {
                trace!(label, control, value, "Profile control");
                settings.insert(control, value);
            }
            None => trace!(label, value, "Skipping unmapped profile label"),
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_token() {
        assert_eq!(value_token("ID{0x1};CHK{0:255:1:128}=VAL{128}"), Some("128"));
        assert_eq!(value_token("=VAL{-5}"), Some("-5"));
        assert_eq!(value_token("=VAL{}"), None);
        assert_eq!(value_token("=VAL{1.5}"), None);
        assert_eq!(value_token("VAL{3}"), None);
    }

    #[test]
    fn test_label_value_pairs() {
        let text = "#V4L2/CTRL/0.0.2\n#Brightness\nID{1}=VAL{128}\n#Contrast\nID{2}=VAL{-5}\n";
        let settings = parse_profile(text);
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.get("brightness"), Some("128"));
        assert_eq!(settings.get("contrast"), Some("-5"));
    }

    #[test]
    fn test_unmapped_label_consumes_value() {
        let text = "#LED1 Mode\n=VAL{3}\n=VAL{7}\n#Gain\n=VAL{9}\n";
        let settings = parse_profile(text);
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("gain"), Some("9"));
    }

    #[test]
    fn test_latest_comment_is_the_label() {
        let text = "# control data\n#Hue\nAPP{\"guvcview\"}\nID{3}=VAL{-12}\n";
        let settings = parse_profile(text);
        assert_eq!(settings.get("hue"), Some("-12"));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_malformed_value_consumes_label() {
        let text = "#Gamma\nID{4}=VAL{abc}\nID{5}=VAL{100}\n";
        assert!(parse_profile(text).is_empty());

        let text = "#Gamma\n=VAL{}\n#Gain\n=VAL{4}\n";
        let settings = parse_profile(text);
        assert_eq!(settings.get("gamma"), None);
        assert_eq!(settings.get("gain"), Some("4"));
    }

    #[test]
    fn test_trailing_label_contributes_nothing() {
        assert!(parse_profile("#Brightness\n").is_empty());
        assert!(parse_profile("=VAL{1}\n").is_empty());
    }

    #[test]
    fn test_magic_marker_is_not_a_label() {
        assert!(parse_profile("#V4L2/CTRL/0.0.2\n=VAL{1}\n").is_empty());
    }

    #[test]
    fn test_indented_lines_are_trimmed() {
        let text = "   #Focus, Absolute  \n\t=VAL{250}  \n";
        assert_eq!(parse_profile(text).get("focus_absolute"), Some("250"));
    }
}
