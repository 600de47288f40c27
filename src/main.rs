use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docker_publish::cli::orchestration::{
    prepare_release, run_release_workflow, ReleaseWorkflowArgs,
};
use docker_publish::config::EnvInputs;
use docker_publish::release::{GithubOutput, SystemRunner};
use docker_publish::ui;

#[derive(clap::Parser)]
#[command(
    name = "docker-publish",
    version,
    about = "Build and push a Docker image tagged from the triggering git reference"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'r',
        long = "ref",
        help = "Git reference to tag from (defaults to GITHUB_REF, then the checked-out branch)"
    )]
    reference: Option<String>,

    #[arg(long, help = "Container CLI to invoke instead of docker")]
    container_cli: Option<String>,

    #[arg(long, help = "Print the tags and commands without running anything")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let workflow_args = ReleaseWorkflowArgs {
        config_path: args.config,
        reference: args.reference,
        container_cli: args.container_cli,
        dry_run: args.dry_run,
    };

    let prepared = prepare_release(
        &workflow_args,
        &EnvInputs,
        std::env::var("GITHUB_REF").ok(),
    )?;

    run_release_workflow(
        &prepared,
        workflow_args.dry_run,
        SystemRunner::new(),
        GithubOutput::from_env(),
    )?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
