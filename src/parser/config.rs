//! guvcview config file (`key=value`) parser.

use tracing::trace;

use crate::controls;
use crate::settings::ControlSettings;

/// Normalize boolean-ish values to `1`/`0`; anything else passes through.
pub fn canonical_value(value: &str) -> &str {
    const TRUE_WORDS: [&str; 3] = ["true", "yes", "on"];
    const FALSE_WORDS: [&str; 3] = ["false", "no", "off"];

    if TRUE_WORDS.iter().any(|w| value.eq_ignore_ascii_case(w)) {
        "1"
    } else if FALSE_WORDS.iter().any(|w| value.eq_ignore_ascii_case(w)) {
        "0"
    } else {
        value
    }
}

/// Parse config text into canonical settings.
///
/// Lines are split at the first `=`; lines without one and keys outside the
/// config-key table are ignored.
pub fn parse_config(text: &str) -> ControlSettings {
    let mut settings = ControlSettings::new();

    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let Some(control) = controls::from_config_key(key) else {
            continue;
        };
        let value = canonical_value(value.trim());
        trace!(key, control, value, "Config control");
        settings.insert(control, value);
    }

    settings
}
