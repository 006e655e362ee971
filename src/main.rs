use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use release_tag::cli::{run_release, ReleaseArgs};
use release_tag::config;
use release_tag::domain::ReleaseVersion;
use release_tag::git::{Git2Repository, Repository};
use release_tag::logging;
use release_tag::ui;
use release_tag::version_file::VersionFile;
use release_tag::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "release-tag",
    version,
    about = "Bump the version file, commit, tag and optionally push a release"
)]
struct Args {
    #[arg(value_name = "VERSION", help = "Version to release, as x.y.z or vx.y.z")]
    release_version: String,

    #[arg(
        short,
        long,
        value_name = "REMOTE",
        help = "Push the release commit and tag to this remote"
    )]
    push: Option<String>,

    #[arg(
        short,
        long,
        help = "Overwrite an existing tag, allow an unchanged version file, force-push the tag"
    )]
    force: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Path inside the repository to release [default: .]")]
    repo: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print debug logs to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    // Reject malformed input before looking at any repository
    if let Err(e) = ReleaseVersion::parse(&args.release_version) {
        exit_with(&e);
    }

    let git_repo = match Git2Repository::open(args.repo.clone().unwrap_or_else(|| ".".into())) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };
    let workdir = match git_repo.workdir() {
        Ok(dir) => dir,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let config = match config::load_config(args.config.as_deref(), &workdir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let version_file = VersionFile::new(
        &workdir,
        &config.version_file.path,
        &config.version_file.constant,
    );

    let release_args = ReleaseArgs {
        version: args.release_version,
        remote: args.push,
        force: args.force,
        dry_run: args.dry_run,
    };

    match run_release(&git_repo, &version_file, &release_args) {
        Ok(outcome) if outcome.dry_run => Ok(()),
        Ok(outcome) => {
            if !outcome.pushed {
                ui::display_manual_push_instruction(&outcome.tag);
            }
            ui::display_success(&format!("Successfully released {}", outcome.tag));
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(error: &ReleaseError) -> ! {
    match error {
        ReleaseError::Format(msg) => ui::display_error(msg),
        ReleaseError::TagExists(tag) => {
            ui::display_error(&format!("tag \"{}\" already exists", tag))
        }
        other => ui::display_error(&other.to_string()),
    }
    std::process::exit(1);
}
