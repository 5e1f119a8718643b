//! Control name tables.
//!
//! guvcview names camera controls two different ways: profiles (`.gpfl`)
//! carry the driver's human-readable labels, config files carry short
//! snake-case keys. Both are mapped onto the canonical V4L2 control names
//! understood by `v4l2-ctl -c`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Profile label → canonical control name.
pub const PROFILE_LABELS: &[(&str, &str)] = &[
    ("Brightness", "brightness"),
    ("Contrast", "contrast"),
    ("Saturation", "saturation"),
    ("Hue", "hue"),
    ("Gamma", "gamma"),
    ("Gain", "gain"),
    ("Sharpness", "sharpness"),
    ("White Balance, Automatic", "white_balance_temperature_auto"),
    ("White Balance Temperature", "white_balance_temperature"),
    ("Backlight Compensation", "backlight_compensation"),
    ("Power Line Frequency", "power_line_frequency"),
    ("Auto Exposure", "exposure_auto"),
    ("Exposure, Dynamic Framerate", "exposure_dynamic_framerate"),
    ("Pan, Absolute", "pan_absolute"),
    ("Tilt, Absolute", "tilt_absolute"),
    ("Focus, Absolute", "focus_absolute"),
    ("Focus, Automatic Continuous", "focus_auto"),
    ("Zoom, Absolute", "zoom_absolute"),
    ("Exposure, Auto Priority", "exposure_auto_priority"),
];

/// Config-file key → canonical control name.
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    ("brightness", "brightness"),
    ("contrast", "contrast"),
    ("saturation", "saturation"),
    ("gain", "gain"),
    ("sharpness", "sharpness"),
    ("gamma", "gamma"),
    ("exposure_abs", "exposure_absolute"),
    ("exposure_auto", "exposure_auto"),
    (
        "white_balance_temperature_auto",
        "white_balance_temperature_auto",
    ),
    ("white_balance_temperature", "white_balance_temperature"),
    ("focus_auto", "focus_auto"),
    ("focus_abs", "focus_absolute"),
];

static PROFILE_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| PROFILE_LABELS.iter().copied().collect());

static CONFIG_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| CONFIG_KEYS.iter().copied().collect());

/// Look up the canonical control for a profile label (exact match).
pub fn from_profile_label(label: &str) -> Option<&'static str> {
    PROFILE_MAP.get(label).copied()
}

/// Look up the canonical control for a config-file key (exact match).
pub fn from_config_key(key: &str) -> Option<&'static str> {
    CONFIG_MAP.get(key).copied()
}

/// Returns true if `name` is a canonical control name from either table.
pub fn is_canonical(name: &str) -> bool {
    PROFILE_LABELS
        .iter()
        .chain(CONFIG_KEYS)
        .any(|(_, canonical)| *canonical == name)
}
