//! Scripted prompter and fixed picker for tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::{FilePicker, Prompter};
use crate::error::{CamkeepError, Result};

/// One exchange recorded by [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    Said(String),
    Asked { prompt: String, answer: String },
}

/// Answers prompts from a fixed list and records everything shown.
///
/// Running out of answers behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<Exchange>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    /// Prompts asked so far, in order.
    pub fn prompts(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|e| match e {
                Exchange::Asked { prompt, .. } => Some(prompt.as_str()),
                Exchange::Said(_) => None,
            })
            .collect()
    }

    /// Whether `line` was shown exactly.
    pub fn said(&self, line: &str) -> bool {
        self.count_said(line) > 0
    }

    pub fn count_said(&self, line: &str) -> usize {
        self.transcript
            .iter()
            .filter(|e| matches!(e, Exchange::Said(s) if s == line))
            .count()
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, line: &str) -> Result<()> {
        self.transcript.push(Exchange::Said(line.to_string()));
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        let answer = self.answers.pop_front().ok_or(CamkeepError::InputClosed)?;
        self.transcript.push(Exchange::Asked {
            prompt: prompt.to_string(),
            answer: answer.clone(),
        });
        Ok(answer)
    }
}

/// Picker that always returns the same result.
#[derive(Debug, Clone, Default)]
pub struct FixedPicker {
    path: Option<PathBuf>,
}

impl FixedPicker {
    pub fn new(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    /// A picker the user always cancels.
    pub fn none() -> Self {
        Self::default()
    }
}

impl FilePicker for FixedPicker {
    fn pick(&self) -> Option<PathBuf> {
        self.path.clone()
    }
}
