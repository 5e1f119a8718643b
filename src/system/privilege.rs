//! Privilege elevation for system-level installation steps.

use tracing::{debug, info};

use super::CommandRunner;
use crate::error::Result;

/// Runs a command with administrator rights.
///
/// camkeep never handles credentials itself; implementations delegate to an
/// external helper.
pub trait Elevator {
    /// Run `program args...` elevated. A non-zero exit is an error.
    fn run_elevated(&self, program: &str, args: &[&str]) -> Result<()>;
}

/// Elevates by prefixing a helper program such as `sudo` or `pkexec`.
///
/// An empty helper runs commands directly, for sessions that already have
/// the required rights.
pub struct CommandElevator<'a> {
    runner: &'a dyn CommandRunner,
    helper: String,
}

impl<'a> CommandElevator<'a> {
    pub fn new(runner: &'a dyn CommandRunner, helper: impl Into<String>) -> Self {
        Self {
            runner,
            helper: helper.into(),
        }
    }
}

impl Elevator for CommandElevator<'_> {
    fn run_elevated(&self, program: &str, args: &[&str]) -> Result<()> {
        if self.helper.trim().is_empty() {
            debug!(program, "Running without privilege helper");
            self.runner.run_checked(program, args)?;
            return Ok(());
        }

        info!(helper = %self.helper, program, "Requesting elevated privileges");
        let mut full: Vec<&str> = Vec::with_capacity(args.len() + 1);
        full.push(program);
        full.extend_from_slice(args);
        self.runner.run_checked(&self.helper, &full)?;
        Ok(())
    }
}
