//! Integration tests for restore script generation.

use std::fs;
use std::os::unix::fs::PermissionsExt;

use camkeep::parser;
use camkeep::script::{self, SCRIPT_MODE};
use camkeep::settings::ControlSettings;

use crate::common::{SAMPLE_CONFIG, SAMPLE_PROFILE, TestEnv};

#[test]
fn test_parsed_files_round_trip_through_script() {
    let env = TestEnv::new();
    for (name, body) in [("default.gpfl", SAMPLE_PROFILE), ("video0", SAMPLE_CONFIG)] {
        let parsed = parser::parse_file(&env.write_file(name, body)).unwrap();
        script::write_script(&env.script_path(), &parsed.settings, "/dev/video0", "v4l2-ctl")
            .unwrap();

        let text = script::read_script(&env.script_path()).unwrap();
        assert_eq!(script::parse_script(&text), parsed.settings);
        assert_eq!(script::script_device(&text).as_deref(), Some("/dev/video0"));
    }
}

#[test]
fn test_script_lines_follow_setting_order() {
    let env = TestEnv::new();
    let settings: ControlSettings = [("gain", "4"), ("brightness", "-12")].into_iter().collect();
    script::write_script(&env.script_path(), &settings, "/dev/video2", "v4l2-ctl").unwrap();

    let text = fs::read_to_string(env.script_path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "#!/bin/bash",
            "v4l2-ctl -d /dev/video2 -c gain=4",
            "v4l2-ctl -d /dev/video2 -c brightness=-12",
        ]
    );

    let mode = fs::metadata(env.script_path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, SCRIPT_MODE);
}

#[test]
fn test_arbitrary_config_values_stay_inert() {
    let env = TestEnv::new();
    let path = env.write_file("video0", "brightness=$(touch pwned)\ngain=1 2\n");
    let parsed = parser::parse_file(&path).unwrap();

    script::write_script(&env.script_path(), &parsed.settings, "/dev/video0", "v4l2-ctl")
        .unwrap();
    let text = fs::read_to_string(env.script_path()).unwrap();
    assert!(text.contains("-c 'brightness=$(touch pwned)'"));
    assert_eq!(script::parse_script(&text), parsed.settings);
}
