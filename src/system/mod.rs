//! External command abstraction.
//!
//! Every interaction with the operating system that goes through another
//! program (`v4l2-ctl`, `udevadm`, `systemctl`, the privilege helper, the
//! restore script itself) is expressed through [`CommandRunner`], so that
//! device enumeration and installation can be tested against
//! [`mock::MockRunner`] without touching real hardware or system state.

pub mod mock;
mod privilege;
mod real;

pub use privilege::{CommandElevator, Elevator};
pub use real::SystemRunner;

use serde::Serialize;

use crate::error::{CamkeepError, Result};

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    #[must_use]
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Runs external programs and captures their output.
///
/// Implementations block until the program exits. `Err` means the program
/// could not be started at all; a non-zero exit is reported through
/// [`CommandOutput::status`].
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a program and turn a non-zero exit into [`CamkeepError::CommandFailed`].
    fn run_checked(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(program, args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(CamkeepError::CommandFailed {
                command: command_line(program, args),
                status: output.status.unwrap_or(-1),
                stderr: output.stderr,
            })
        }
    }
}

/// Render a program and its arguments as a single display string.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
