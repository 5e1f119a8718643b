//! Common test utilities for camkeep.
//!
//! - sample guvcview files
//! - [`TestEnv`]: a temp directory standing in for `/dev`, the home
//!   directory and the staging area, with a matching config
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use camkeep::config::AppConfig;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// guvcview 2.x control profile excerpt.
pub const SAMPLE_PROFILE: &str = "\
#V4L2/CTRL/0.0.2
APP{\"guvcview\",\"2.0.8\"}
# control data
#Brightness
0x00980900=VAL{128}
#Contrast
0x00980901=VAL{-5}
#White Balance, Automatic
0x0098090c=VAL{0}
#Focus, Automatic Continuous
0x009a090c=VAL{1}
#Pan, Absolute
0x009a0908=VAL{3600}
";

/// guvcview per-device config file excerpt.
pub const SAMPLE_CONFIG: &str = "\
# guvcview configuration
resolution=1280x720
brightness=140
exposure_auto=True
focus_auto=no
sharpness = 3
fps=1/30
";

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Isolated filesystem for one test.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("dev")).expect("Failed to create dev dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn dev_dir(&self) -> PathBuf {
        self.path().join("dev")
    }

    pub fn script_path(&self) -> PathBuf {
        self.path().join("restore-webcam-settings.sh")
    }

    pub fn autostart_dir(&self) -> PathBuf {
        self.path().join("autostart")
    }

    /// Create empty device nodes such as `video0`.
    pub fn add_nodes(&self, names: &[&str]) {
        for name in names {
            fs::write(self.dev_dir().join(name), "").expect("Failed to create node");
        }
    }

    pub fn write_file(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, body).expect("Failed to write file");
        path
    }

    /// Write an executable shell script.
    pub fn write_executable(&self, name: &str, body: &str) -> PathBuf {
        let path = self.write_file(name, body);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod");
        path
    }

    /// Config with every location inside the temp directory.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::defaults().expect("defaults");
        config.device_dir = self.dev_dir();
        config.script_path = self.script_path();
        config.autostart_dir = self.autostart_dir();
        config.udev_rules_path = self.path().join("rules.d/99-webcam-settings.rules");
        config.systemd_unit_dir = self.path().join("systemd");
        config.staging_dir = self.path().to_path_buf();
        config
    }

    /// Write a TOML config for the binary: no privilege helper, `true` as
    /// the control tool and an unavailable `udevadm`.
    pub fn write_config(&self) -> PathBuf {
        let toml = format!(
            "script_path = \"{}\"\n\
             device_dir = \"{}\"\n\
             autostart_dir = \"{}\"\n\
             staging_dir = \"{}\"\n\
             elevate_command = \"\"\n\
             control_tool = \"true\"\n\
             udevadm = \"/nonexistent/udevadm\"\n\
             service_user = \"camkeep-test\"\n",
            self.script_path().display(),
            self.dev_dir().display(),
            self.autostart_dir().display(),
            self.path().display(),
        );
        self.write_file("config.toml", &toml)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
