//! Release sequencing against an external container toolchain
//!
//! The orchestrator never touches processes or files itself. It talks to two
//! collaborators:
//! - [CommandRunner]: runs one toolchain command ([runner::SystemRunner] in
//!   production, [mock::RecordingRunner] in tests)
//! - [OutputSink]: publishes named values ([output::GithubOutput] in
//!   production, [mock::MemoryOutput] in tests)

pub mod command;
pub mod mock;
pub mod output;
pub mod runner;

pub use command::{Step, ToolCommand, Toolchain};
pub use output::{GithubOutput, OutputSink, TAG_OUTPUT};
pub use runner::{CommandRunner, SystemRunner};

use tracing::{debug, info};

use crate::config::ReleaseInputs;
use crate::domain::{image_ref, TagList};
use crate::error::Result;
use crate::ui;

/// Result of a completed release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// Primary tag, also published as the `tag` output
    pub tag: String,
    /// Content digest reported by `inspect`
    pub digest: String,
}

/// Commands a release runs, in order
///
/// login, one build covering every tag, one push per tag, inspect of the
/// primary tag, logout.
pub fn plan(inputs: &ReleaseInputs, tags: &TagList) -> Vec<ToolCommand> {
    let toolchain = Toolchain::new(&inputs.container_cli);
    let registry = inputs.registry.as_deref();
    let image_refs = tags.image_refs(&inputs.repository);

    let mut commands = Vec::with_capacity(tags.len() + 4);
    commands.push(toolchain.login(&inputs.username, inputs.password.as_ref(), registry));
    commands.push(toolchain.build(inputs.dockerfile.as_deref(), &image_refs, &inputs.context));
    commands.extend(image_refs.iter().map(|image_ref| toolchain.push(image_ref)));
    commands.push(toolchain.inspect(&image_ref(&inputs.repository, tags.primary())));
    commands.push(toolchain.logout(registry));
    commands
}

/// Drives one release through a [CommandRunner] and reports to an [OutputSink]
pub struct ReleaseOrchestrator<R, O> {
    runner: R,
    output: O,
}

impl<R: CommandRunner, O: OutputSink> ReleaseOrchestrator<R, O> {
    pub fn new(runner: R, output: O) -> Self {
        ReleaseOrchestrator { runner, output }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Run the release sequence for `tags`
    ///
    /// Commands run strictly one after another. The first failure aborts the
    /// sequence and is returned as is; in that case no output is set.
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - primary tag and image digest
    /// * `Err` - the failing command's error
    pub fn run(&mut self, inputs: &ReleaseInputs, tags: &TagList) -> Result<ReleaseOutcome> {
        let mut digest = String::new();

        for command in plan(inputs, tags) {
            ui::display_command(&command);
            let stdout = self.runner.run(&command)?;
            debug!(step = command.step.name(), "command finished");

            if command.step == Step::Inspect {
                digest = stdout.trim().to_string();
                info!(
                    image = %image_ref(&inputs.repository, tags.primary()),
                    digest = %digest,
                    "image digest"
                );
            }
        }

        self.output.set_output(TAG_OUTPUT, tags.primary())?;

        Ok(ReleaseOutcome {
            tag: tags.primary().to_string(),
            digest,
        })
    }
}
