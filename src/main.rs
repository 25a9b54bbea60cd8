use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cut_release::cli::{run_release_reporting, ReleaseArgs};
use cut_release::config;
use cut_release::domain::{DerivedFrom, ReleaseVersion};
use cut_release::editor::CommandEditor;
use cut_release::git::Git2Workspace;
use cut_release::github::GitHubClient;
use cut_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "cut-release",
    version,
    about = "Create an agent release branch with a version bump and release notes"
)]
struct Args {
    /// New version, <major>.<minor>.<patch> with each level 0-999
    #[arg(value_name = "VERSION")]
    release_version: String,

    #[arg(
        long = "dryrun",
        visible_alias = "dry-run",
        help = "Dry run only, do not actually commit new release"
    )]
    dry_run: bool,

    #[arg(
        long = "derived-from",
        alias = "derivedFrom",
        value_name = "VERSION",
        default_value = "latest",
        help = "Used to get PRs merged since this release was created"
    )]
    derived_from: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Editor command, overrides the configured one")]
    editor: Option<String>,

    #[arg(
        short = 'C',
        long = "repo",
        default_value = ".",
        help = "Path inside the agent repository"
    )]
    repo: String,

    #[arg(short, long, help = "Log debug details")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // Reject a bad version before touching the network or the repository
    ReleaseVersion::validate(&args.release_version)?;

    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(command) = args.editor {
        config.editor.command = command;
    }

    let token = config
        .github
        .token_env
        .as_deref()
        .filter(|name| !name.is_empty())
        .and_then(|name| std::env::var(name).ok());

    let source = GitHubClient::new(&config.github, token)?;
    let workspace = Git2Workspace::open(&args.repo)?;
    let editor = CommandEditor::parse(&config.editor.command)?;

    let release_args = ReleaseArgs {
        version: args.release_version,
        derived_from: DerivedFrom::parse(&args.derived_from),
        dry_run: args.dry_run,
    };

    ui::display_status(&format!(
        "Preparing release {} (derived from {})",
        release_args.version, release_args.derived_from
    ));

    let outcome = run_release_reporting(
        &release_args,
        &config,
        &source,
        &workspace,
        &editor,
        ui::display_boundary_warning,
    )?;

    ui::display_success(&format!(
        "Version {} is available, baseline {} published {}",
        outcome.version, outcome.baseline.tag_name, outcome.baseline.published_at
    ));

    if outcome.dry_run {
        ui::display_classified(&outcome.classified);
        ui::display_notes_preview(&config.release.notes_file, &outcome.notes);
        ui::display_dry_run_plan(
            outcome.version.as_str(),
            &outcome.branch,
            &config.release.remote,
        );
        return Ok(());
    }

    if let Some(commit) = &outcome.commit {
        ui::display_success(&format!(
            "Committed Agent Release {} ({})",
            outcome.version,
            &commit[..commit.len().min(7)]
        ));
    }
    if outcome.pushed {
        ui::display_success(&format!(
            "Pushed {} to {}",
            outcome.branch, config.release.remote
        ));
    }
    println!("done.");

    Ok(())
}
