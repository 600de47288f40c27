//! Main workflow orchestration logic
//!
//! Keeps argument parsing in main.rs apart from the release workflow so the
//! workflow can be driven programmatically with any runner and output sink.

use crate::boundary;
use crate::config::{load_config, InputSource, ReleaseInputs};
use crate::domain::TagList;
use crate::error::Result;
use crate::git_ops;
use crate::release::{self, CommandRunner, OutputSink, ReleaseOrchestrator};
use crate::resolver;
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Explicit git reference, overriding `GITHUB_REF`
    pub reference: Option<String>,

    /// Container CLI overriding the configured one
    pub container_cli: Option<String>,

    /// Preview mode - print the plan, run nothing
    pub dry_run: bool,
}

/// Everything a release needs, validated before any command runs
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRelease {
    pub reference: String,
    pub inputs: ReleaseInputs,
}

/// Result of a release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Resolved tags, primary first
    pub tags: TagList,

    /// Image digest; `None` on a dry run
    pub digest: Option<String>,

    /// Whether the image was built and pushed
    pub published: bool,
}

/// Load configuration, gather inputs and pick the reference
///
/// # Returns
/// * `Ok(PreparedRelease)` - ready to run
/// * `Err` - configuration errors (missing input, bad config file, no reference)
pub fn prepare_release(
    args: &ReleaseWorkflowArgs,
    inputs: &impl InputSource,
    env_reference: Option<String>,
) -> Result<PreparedRelease> {
    let config = load_config(args.config_path.as_deref())?;
    let mut release_inputs = ReleaseInputs::gather(&config, inputs)?;
    if let Some(cli) = &args.container_cli {
        release_inputs.container_cli = cli.clone();
    }

    let reference = git_ops::select_reference(args.reference.clone(), env_reference)?;

    Ok(PreparedRelease {
        reference,
        inputs: release_inputs,
    })
}

/// Main release workflow
///
/// 1. Resolve tags for the reference and report warnings
/// 2. On a dry run, print the planned commands and stop
/// 3. Otherwise run login, build, push, inspect and logout, then set the `tag` output
pub fn run_release_workflow<R: CommandRunner, O: OutputSink>(
    prepared: &PreparedRelease,
    dry_run: bool,
    runner: R,
    output: O,
) -> Result<WorkflowResult> {
    let options = &prepared.inputs.tag_options;
    let tags = resolver::resolve(&prepared.reference, options);

    for warning in boundary::diagnose(&prepared.reference, options) {
        ui::display_boundary_warning(&warning);
    }
    ui::display_resolved_tags(&prepared.reference, &tags);

    if dry_run {
        ui::display_plan(&release::plan(&prepared.inputs, &tags));
        ui::display_status(&format!("Dry run: output 'tag' would be {}", tags.primary()));
        return Ok(WorkflowResult {
            tags,
            digest: None,
            published: false,
        });
    }

    let mut orchestrator = ReleaseOrchestrator::new(runner, output);
    let outcome = orchestrator.run(&prepared.inputs, &tags)?;

    ui::display_success(&format!(
        "Published {} as {}",
        prepared.inputs.repository, tags
    ));
    if !outcome.digest.is_empty() {
        ui::display_status(&format!("Digest: {}", outcome.digest));
    }

    Ok(WorkflowResult {
        tags,
        digest: Some(outcome.digest),
        published: true,
    })
}
