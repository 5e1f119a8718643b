//! Integration tests for persistence registration.

use std::fs;

use camkeep::install::{AUTOSTART_FILE, InstallStep, Installer, StepOutcome};
use camkeep::system::mock::{Invocation, MockRunner};
use camkeep::system::{CommandElevator, CommandOutput};

use crate::common::TestEnv;

const UDEV_INFO: &str = "\
N: video0
E: DEVNAME=/dev/video0
E: ID_VENDOR_ID=046d
E: ID_MODEL_ID=0825
";

#[test]
fn test_full_install_command_sequence() {
    let env = TestEnv::new();
    let config = env.config();
    let runner = MockRunner::new();
    runner.respond("udevadm info", CommandOutput::ok(UDEV_INFO));
    let elevator = CommandElevator::new(&runner, "sudo");

    let report = Installer::new(&config, &runner, &elevator)
        .with_login_user(Some("ana".to_string()))
        .install_all("/dev/video0", &config.script_path, true);
    assert!(!report.has_failures());

    let staged_rule = env.path().join("99-webcam-settings.rules");
    let staged_unit = env.path().join("restore-webcam-settings.service");
    let rules = config.udev_rules_path.display().to_string();
    let unit = config.service_unit_path().display().to_string();
    runner.assert_invocations(&[
        Invocation::new("udevadm", &["info", "--query=all", "--name=/dev/video0"]),
        Invocation::new("sudo", &["mv", staged_rule.to_str().unwrap(), rules.as_str()]),
        Invocation::new("sudo", &["udevadm", "control", "--reload-rules"]),
        Invocation::new("sudo", &["udevadm", "trigger"]),
        Invocation::new("sudo", &["mv", staged_unit.to_str().unwrap(), unit.as_str()]),
        Invocation::new("sudo", &["systemctl", "daemon-reload"]),
        Invocation::new("sudo", &["systemctl", "enable", "restore-webcam-settings.service"]),
    ]);

    let rule = fs::read_to_string(&staged_rule).unwrap();
    assert!(rule.contains("ATTRS{idVendor}==\"046d\", ATTRS{idProduct}==\"0825\""));
    assert!(rule.contains(&format!("RUN+=\"{}\"", config.script_path.display())));

    let entry = fs::read_to_string(env.autostart_dir().join(AUTOSTART_FILE)).unwrap();
    assert!(entry.contains(&format!("Exec={}", config.script_path.display())));
}

#[test]
fn test_reinstall_overwrites() {
    let env = TestEnv::new();
    let config = env.config();
    let runner = MockRunner::new();
    let elevator = CommandElevator::new(&runner, "");
    let installer = Installer::new(&config, &runner, &elevator);

    fs::create_dir_all(env.autostart_dir()).unwrap();
    fs::write(env.autostart_dir().join(AUTOSTART_FILE), "stale").unwrap();

    assert!(installer.autostart(&config.script_path).is_installed());
    let entry = fs::read_to_string(env.autostart_dir().join(AUTOSTART_FILE)).unwrap();
    assert!(entry.starts_with("[Desktop Entry]"));
}

#[test]
fn test_udev_without_ids_is_skipped() {
    let env = TestEnv::new();
    let config = env.config();
    let runner = MockRunner::new();
    runner.respond("udevadm info", CommandOutput::ok("E: ID_VENDOR_ID=046d\n"));
    let elevator = CommandElevator::new(&runner, "sudo");

    let report = Installer::new(&config, &runner, &elevator).install_all(
        "/dev/video0",
        &config.script_path,
        false,
    );
    assert!(matches!(
        report.outcome(InstallStep::UdevRule),
        Some(StepOutcome::Skipped { .. })
    ));
    assert!(!report.has_failures());
    runner.assert_not_ran("sudo");
}

#[test]
fn test_missing_privilege_helper_fails_steps_independently() {
    let env = TestEnv::new();
    let config = env.config();
    let runner = MockRunner::new();
    runner.respond("udevadm info", CommandOutput::ok(UDEV_INFO));
    runner.spawn_error("sudo", "No such file or directory");
    let elevator = CommandElevator::new(&runner, "sudo");

    let report = Installer::new(&config, &runner, &elevator)
        .with_login_user(Some("ana".to_string()))
        .install_all("/dev/video0", &config.script_path, true);

    let failed: Vec<InstallStep> = report
        .steps
        .iter()
        .filter(|s| s.outcome.is_failed())
        .map(|s| s.step)
        .collect();
    assert_eq!(failed, [InstallStep::UdevRule, InstallStep::BootService]);
    assert!(report.outcome(InstallStep::Autostart).unwrap().is_installed());
}

#[test]
fn test_configured_service_user_wins() {
    let env = TestEnv::new();
    let mut config = env.config();
    config.service_user = Some("video".to_string());
    let runner = MockRunner::new();
    let elevator = CommandElevator::new(&runner, "");

    let outcome = Installer::new(&config, &runner, &elevator)
        .with_login_user(Some("ana".to_string()))
        .boot_service(&config.script_path);
    assert!(outcome.is_installed());

    let unit = fs::read_to_string(env.path().join("restore-webcam-settings.service")).unwrap();
    assert!(unit.contains("\nUser=video\n"));
    runner.assert_ran("mv ");
    runner.assert_ran("systemctl enable restore-webcam-settings.service");
}
