//! Line-oriented user interaction.
//!
//! The wizard talks to the user only through [`Prompter`], so the whole
//! interactive flow can be driven by [`mock::ScriptedPrompter`] in tests.

mod menu;
pub mod mock;
mod picker;

pub use menu::{
    BOOT_SERVICE_QUESTION, choose_settings_file, confirm_boot_service, select_device,
};
pub use picker::{DialogPicker, FilePicker, NoPicker};

use std::io::{self, BufRead, Write};

use tracing::trace;

use crate::error::{CamkeepError, Result};

/// Source of user answers and sink for the lines shown around them.
pub trait Prompter {
    /// Show one line of text.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Show `prompt` without a newline and read one answer, trimmed.
    ///
    /// End of input is [`CamkeepError::InputClosed`].
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// [`Prompter`] over any reader/writer pair.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter on stdin that shows its text on stderr, keeping stdout free
    /// for machine-readable output.
    pub fn stdin_stderr() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(CamkeepError::InputClosed);
        }
        let answer = answer.trim().to_string();
        trace!(prompt, answer = %answer, "Prompt answered");
        Ok(answer)
    }
}
