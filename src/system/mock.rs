//! Mock command runner for unit testing.
//!
//! Records every invocation and answers from a table of canned responses,
//! so callers can be tested without `v4l2-ctl`, `udevadm` or `sudo`.
//!
//! # Example
//!
//! ```rust
//! use camkeep::system::mock::{Invocation, MockRunner};
//! use camkeep::system::{CommandOutput, CommandRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond("v4l2-ctl", CommandOutput::ok("Driver Info:\n"));
//!
//! let out = runner.run("v4l2-ctl", &["-d", "/dev/video0", "--info"]).unwrap();
//! assert_eq!(out.stdout, "Driver Info:\n");
//!
//! runner.assert_invocations(&[Invocation::new("v4l2-ctl", &["-d", "/dev/video0", "--info"])]);
//! ```

use std::sync::Mutex;

use tracing::trace;

use super::{CommandOutput, CommandRunner, command_line};
use crate::error::{CamkeepError, Result};

/// Recorded command for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// The full command line, space separated.
    pub fn command_line(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        command_line(&self.program, &args)
    }
}

/// How a matching rule answers.
#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    SpawnError(String),
}

#[derive(Debug, Clone)]
struct Rule {
    /// Matched against the start of the command line
    prefix: String,
    reply: Reply,
}

/// Mock runner that records invocations.
///
/// Rules are matched against the command line by prefix; the most recently
/// added matching rule wins. Unmatched commands succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Mutex<Vec<Rule>>,
    log: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Configuration ===

    /// Answer commands starting with `prefix` with `output`.
    pub fn respond(&self, prefix: &str, output: CommandOutput) {
        self.push_rule(prefix, Reply::Output(output));
    }

    /// Make commands starting with `prefix` exit with status 1.
    pub fn fail(&self, prefix: &str, stderr: &str) {
        self.push_rule(prefix, Reply::Output(CommandOutput::failed(1, stderr)));
    }

    /// Make commands starting with `prefix` fail to spawn.
    pub fn spawn_error(&self, prefix: &str, reason: &str) {
        self.push_rule(prefix, Reply::SpawnError(reason.to_string()));
    }

    fn push_rule(&self, prefix: &str, reply: Reply) {
        self.rules.lock().unwrap().push(Rule {
            prefix: prefix.to_string(),
            reply,
        });
    }

    // === Inspection ===

    /// All invocations so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.log.lock().unwrap().clone()
    }

    /// All invocations rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }

    /// Clear the invocation log.
    pub fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }

    // === Assertions ===

    /// Assert the exact invocation sequence.
    pub fn assert_invocations(&self, expected: &[Invocation]) {
        let log = self.log.lock().unwrap();
        assert_eq!(
            log.as_slice(),
            expected,
            "Invocation mismatch.\nExpected: {expected:#?}\nActual: {:#?}",
            *log
        );
    }

    /// Assert some invocation's command line starts with `prefix`.
    pub fn assert_ran(&self, prefix: &str) {
        let lines = self.command_lines();
        assert!(
            lines.iter().any(|l| l.starts_with(prefix)),
            "Expected a command starting with {prefix:?}, got {lines:#?}"
        );
    }

    /// Assert no invocation's command line starts with `prefix`.
    pub fn assert_not_ran(&self, prefix: &str) {
        let lines = self.command_lines();
        assert!(
            !lines.iter().any(|l| l.starts_with(prefix)),
            "Expected no command starting with {prefix:?}, got {lines:#?}"
        );
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let invocation = Invocation::new(program, args);
        let line = invocation.command_line();
        trace!(command = %line, "Mock run");
        self.log.lock().unwrap().push(invocation);

        let reply = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| line.starts_with(&r.prefix))
            .map(|r| r.reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::SpawnError(reason)) => Err(CamkeepError::CommandSpawn {
                command: line,
                reason,
            }),
            None => Ok(CommandOutput::ok("")),
        }
    }
}
