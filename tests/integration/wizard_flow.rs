//! Integration tests for the interactive setup.

use std::fs;

use camkeep::error::CamkeepError;
use camkeep::install::{InstallStep, Installer};
use camkeep::parser::SourceFormat;
use camkeep::prompt::mock::{FixedPicker, ScriptedPrompter};
use camkeep::system::mock::MockRunner;
use camkeep::system::{CommandElevator, CommandOutput};
use camkeep::wizard::{SetupSummary, Wizard};

use crate::common::{SAMPLE_CONFIG, SAMPLE_PROFILE, TestEnv, init_test_logging};

fn run(
    env: &TestEnv,
    runner: &MockRunner,
    picker: &FixedPicker,
    prompter: &mut ScriptedPrompter,
) -> camkeep::error::Result<SetupSummary> {
    let config = env.config();
    let elevator = CommandElevator::new(runner, "sudo");
    let installer =
        Installer::new(&config, runner, &elevator).with_login_user(Some("ana".to_string()));
    Wizard::new(&config, runner, installer, picker).run(prompter)
}

fn camera_runner() -> MockRunner {
    let runner = MockRunner::new();
    runner.respond("v4l2-ctl", CommandOutput::ok("Driver Info:\n"));
    runner.respond("udevadm info", CommandOutput::ok("E: ID_VENDOR_ID=046d\nE: ID_MODEL_ID=085c\n"));
    runner
}

#[test]
fn test_setup_with_picked_profile() {
    init_test_logging();
    let env = TestEnv::new();
    env.add_nodes(&["video0", "video1", "vbi0"]);
    let profile = env.write_file("default.gpfl", SAMPLE_PROFILE);
    let runner = camera_runner();
    let mut prompter = ScriptedPrompter::new(["1", "2", "2"]);

    let summary = run(&env, &runner, &FixedPicker::new(&profile), &mut prompter).unwrap();

    assert_eq!(summary.format, SourceFormat::Profile);
    assert_eq!(summary.controls, 5);
    assert!(prompter.said(&format!("1: {}/video0 (Driver Info:)", env.dev_dir().display())));
    assert!(prompter.said(&format!("2: {}/video1 (Driver Info:)", env.dev_dir().display())));
    assert!(!prompter.transcript().iter().any(|e| format!("{e:?}").contains("vbi0")));

    let text = fs::read_to_string(env.script_path()).unwrap();
    assert!(text.contains("-c pan_absolute=3600\n"));
    assert_eq!(summary.install.outcome(InstallStep::BootService), None);
    assert_eq!(
        prompter.prompts(),
        ["Enter the number of your choice: ", "Enter 1 or 2: ", "Enter 1 or 2: "]
    );
}

#[test]
fn test_setup_order_of_side_effects() {
    let env = TestEnv::new();
    env.add_nodes(&["video0"]);
    let file = env.write_file("video0.conf", SAMPLE_CONFIG);
    let runner = camera_runner();
    let mut prompter =
        ScriptedPrompter::new(["1", "1", file.to_str().unwrap(), "1"]);

    run(&env, &runner, &FixedPicker::none(), &mut prompter).unwrap();

    let lines = runner.command_lines();
    let position = |prefix: &str| {
        lines
            .iter()
            .position(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("{prefix} not run: {lines:#?}"))
    };
    let script = env.script_path().display().to_string();
    assert!(position("sudo udevadm trigger") < position(&script));
    assert!(position(&script) < position("sudo systemctl enable"));
}

#[test]
fn test_no_devices() {
    let env = TestEnv::new();
    env.add_nodes(&["vbi0", "media0"]);
    let runner = camera_runner();
    let mut prompter = ScriptedPrompter::new(["1"]);

    let err = run(&env, &runner, &FixedPicker::none(), &mut prompter).unwrap_err();
    assert!(matches!(err, CamkeepError::NoDevicesFound));
    assert!(prompter.transcript().is_empty());
    assert!(runner.invocations().is_empty());
}

#[test]
fn test_no_settings_writes_nothing() {
    let env = TestEnv::new();
    env.add_nodes(&["video0"]);
    let file = env.write_file("empty.gpfl", "#V4L2/CTRL/0.0.2\n#Mystery\n=VAL{1}\n");
    let runner = camera_runner();
    let mut prompter = ScriptedPrompter::new(["1", "1", file.to_str().unwrap()]);

    let err = run(&env, &runner, &FixedPicker::none(), &mut prompter).unwrap_err();
    assert!(matches!(err, CamkeepError::NoSettingsFound { .. }));
    assert!(!env.script_path().exists());
    assert!(!env.autostart_dir().exists());
}
