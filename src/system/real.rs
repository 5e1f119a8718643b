//! Process-spawning command runner.

use std::process::{Command, Stdio};

use tracing::{debug, trace};

use super::{CommandOutput, CommandRunner, command_line};
use crate::error::{CamkeepError, Result};

/// Runs commands as child processes of this one.
///
/// stdin is inherited so that a privilege helper such as `sudo` can ask for
/// a password on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(command = %command_line(program, args), "Running command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .output()
            .map_err(|e| CamkeepError::CommandSpawn {
                command: command_line(program, args),
                reason: e.to_string(),
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        trace!(
            status = ?result.status,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "Command finished"
        );
        Ok(result)
    }
}
