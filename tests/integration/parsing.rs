//! Integration tests for guvcview file parsing.

use camkeep::controls;
use camkeep::error::CamkeepError;
use camkeep::parser::{self, SourceFormat};

use crate::common::{SAMPLE_CONFIG, SAMPLE_PROFILE, TestEnv, init_test_logging};

#[test]
fn test_profile_file() {
    init_test_logging();
    let env = TestEnv::new();
    let path = env.write_file("default.gpfl", SAMPLE_PROFILE);

    let parsed = parser::parse_file(&path).unwrap();
    assert_eq!(parsed.format, SourceFormat::Profile);

    let pairs: Vec<(&str, &str)> = parsed
        .settings
        .iter()
        .map(|s| (s.control.as_str(), s.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("brightness", "128"),
            ("contrast", "-5"),
            ("white_balance_temperature_auto", "0"),
            ("focus_auto", "1"),
            ("pan_absolute", "3600"),
        ]
    );
}

#[test]
fn test_profile_detected_by_magic_without_extension() {
    let env = TestEnv::new();
    let path = env.write_file("video0", SAMPLE_PROFILE);

    let parsed = parser::parse_file(&path).unwrap();
    assert_eq!(parsed.format, SourceFormat::Profile);
    assert_eq!(parsed.settings.get("contrast"), Some("-5"));
}

#[test]
fn test_config_file() {
    let env = TestEnv::new();
    let path = env.write_file("video0", SAMPLE_CONFIG);

    let parsed = parser::parse_file(&path).unwrap();
    assert_eq!(parsed.format, SourceFormat::Config);
    assert_eq!(parsed.settings.len(), 4);
    assert_eq!(parsed.settings.get("brightness"), Some("140"));
    assert_eq!(parsed.settings.get("exposure_auto"), Some("1"));
    assert_eq!(parsed.settings.get("focus_auto"), Some("0"));
    assert_eq!(parsed.settings.get("sharpness"), Some("3"));
    assert_eq!(parsed.settings.get("resolution"), None);
}

#[test]
fn test_outputs_only_canonical_names() {
    let env = TestEnv::new();
    for (name, body) in [("a.gpfl", SAMPLE_PROFILE), ("b", SAMPLE_CONFIG)] {
        let parsed = parser::parse_file(&env.write_file(name, body)).unwrap();
        for setting in &parsed.settings {
            assert!(
                controls::is_canonical(&setting.control),
                "{} is not canonical",
                setting.control
            );
        }
    }
}

#[test]
fn test_gpfl_extension_wins_over_content() {
    let env = TestEnv::new();
    let path = env.write_file("custom.gpfl", SAMPLE_CONFIG);

    let parsed = parser::parse_file(&path).unwrap();
    assert_eq!(parsed.format, SourceFormat::Profile);
    assert!(parsed.settings.is_empty());
}

#[test]
fn test_missing_file() {
    let env = TestEnv::new();
    let err = parser::parse_file(&env.path().join("nope.gpfl")).unwrap_err();
    assert!(matches!(err, CamkeepError::SettingsFileNotFound { .. }));
    assert!(err.is_user_recoverable());
}
