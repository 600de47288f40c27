use std::collections::HashMap;

use crate::error::{PublishError, Result};
use crate::release::command::{Step, ToolCommand};
use crate::release::output::OutputSink;
use crate::release::runner::CommandRunner;

/// Command runner that records commands instead of executing them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Vec<ToolCommand>,
    responses: HashMap<Step, String>,
    failure: Option<(Step, i32, String)>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds with empty stdout
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `stdout` for every command of `step`
    pub fn respond(mut self, step: Step, stdout: impl Into<String>) -> Self {
        self.responses.insert(step, stdout.into());
        self
    }

    /// Fail the first command of `step` with the given exit code and stderr
    pub fn fail_on(mut self, step: Step, code: i32, stderr: impl Into<String>) -> Self {
        self.failure = Some((step, code, stderr.into()));
        self
    }

    /// Commands run so far, in order
    pub fn commands(&self) -> &[ToolCommand] {
        &self.commands
    }

    /// Command lines run so far, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.commands.iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<String> {
        self.commands.push(command.clone());

        if let Some((step, code, stderr)) = &self.failure {
            if *step == command.step {
                return Err(PublishError::CommandFailed {
                    command: command.to_string(),
                    code: *code,
                    stderr: stderr.clone(),
                });
            }
        }

        Ok(self.responses.get(&command.step).cloned().unwrap_or_default())
    }
}

/// Output sink that keeps values in memory
#[derive(Debug, Default)]
pub struct MemoryOutput {
    values: Vec<(String, String)>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value set, in order
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// Last value set for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl OutputSink for MemoryOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
