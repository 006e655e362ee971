//! Release workflow orchestration logic
//!
//! Runs the linear release pipeline:
//! `validate → check tag → rewrite version file → commit → tag → push?`.
//! The pipeline is independent of clap and of the concrete repository, so it
//! can be driven programmatically or against a [MockRepository](crate::git::MockRepository).

use git2::Oid;

use crate::boundary::BoundaryWarning;
use crate::domain::{ReleaseVersion, Tag};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::ui;
use crate::version_file::VersionFile;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args once the version file has been resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseArgs {
    /// Version as typed by the user ("1.2.3" or "v1.2.3")
    pub version: String,

    /// Remote to push commit and tag to; `None` keeps the release local
    pub remote: Option<String>,

    /// Tolerate an empty commit, overwrite the tag, force-push the tag
    pub force: bool,

    /// Validate and plan without writing anything
    pub dry_run: bool,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// Normalized version
    pub version: String,

    /// The tag that was created
    pub tag: String,

    /// Release commit; `None` when nothing changed under force or on a dry run
    pub commit: Option<Oid>,

    /// Whether commit and tag were pushed
    pub pushed: bool,

    pub dry_run: bool,

    /// Tolerated conditions encountered along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main release workflow
///
/// Steps are run in order and the first failure aborts; nothing already done
/// is rolled back (a failed push leaves the local commit and tag in place).
///
/// # Arguments
///
/// * `repo` - Repository to commit, tag and push in
/// * `version_file` - Version file resolved against the repository root
/// * `args` - Workflow arguments (version, remote, force, dry_run)
///
/// # Returns
///
/// * `Ok(ReleaseOutcome)` - Release performed (or planned, on a dry run)
/// * `Err(Format)` - Malformed version, nothing touched
/// * `Err(TagExists)` - Tag exists and `force` is off, nothing touched
/// * `Err(..)` - Any later step failed
pub fn run_release<R: Repository>(
    repo: &R,
    version_file: &VersionFile,
    args: &ReleaseArgs,
) -> Result<ReleaseOutcome> {
    let version = ReleaseVersion::parse(&args.version)?;
    let tag = Tag::for_version(&version);
    tracing::debug!(%version, %tag, force = args.force, "validated release version");

    if !args.force && repo.tag_exists(&tag.name)? {
        return Err(ReleaseError::TagExists(tag.name));
    }

    if args.dry_run {
        return plan_release(repo, version_file, &version, &tag, args);
    }

    let mut warnings = Vec::new();

    ui::display_status(&format!(
        "Updating {} to {}",
        version_file.relative_path().display(),
        version
    ));
    let rewrite = version_file.update(&version)?;
    tracing::info!(replaced = rewrite.replaced, "version file updated");

    repo.stage(version_file.relative_path())?;
    let commit = match repo.commit(&version.commit_message()) {
        Ok(oid) => {
            tracing::info!(%oid, "created release commit");
            Some(oid)
        }
        Err(ReleaseError::NothingToCommit(_)) if args.force => {
            let warning = BoundaryWarning::NothingToCommit {
                version: version.to_string(),
            };
            tracing::warn!(%version, "nothing to commit");
            ui::display_boundary_warning(&warning);
            warnings.push(warning);
            None
        }
        Err(e) => return Err(e),
    };

    // Without force this also catches a tag created since the upfront check
    let tagged = repo.create_tag(&tag.name, args.force)?;
    tracing::info!(tag = %tag, commit = %tagged, "created tag");
    ui::display_success(&format!("Created tag: {}", tag));

    let pushed = match &args.remote {
        Some(remote) => {
            if args.force {
                let warning = BoundaryWarning::RemoteTagOverwrite {
                    tag: tag.name.clone(),
                    remote: remote.clone(),
                };
                ui::display_boundary_warning(&warning);
                warnings.push(warning);
            }

            ui::display_status(&format!("Pushing HEAD and {} to {}", tag, remote));
            repo.push_head(remote)?;
            repo.push_tag(remote, &tag.name, args.force)?;
            tracing::info!(%remote, tag = %tag, "pushed release");
            true
        }
        None => false,
    };

    Ok(ReleaseOutcome {
        version: version.to_string(),
        tag: tag.name,
        commit,
        pushed,
        dry_run: false,
        warnings,
    })
}

/// Plan a release without writing anything
///
/// The commit step is predicted against the version file as committed at
/// HEAD, the same comparison the real commit makes, so uncommitted edits in
/// the working copy do not turn into a false "nothing to commit".
fn plan_release<R: Repository>(
    repo: &R,
    version_file: &VersionFile,
    version: &ReleaseVersion,
    tag: &Tag,
    args: &ReleaseArgs,
) -> Result<ReleaseOutcome> {
    let rewrite = version_file.plan(version)?;
    let at_head = repo.head_file_content(version_file.relative_path())?;
    let commit_needed = at_head.as_deref() != Some(rewrite.content.as_str());
    tracing::debug!(commit_needed, "planned version file rewrite");
    let mut warnings = Vec::new();

    let mut steps = vec![format!(
        "Rewrite {} line(s) in {} to \"{}\"",
        rewrite.replaced,
        version_file.relative_path().display(),
        version
    )];

    if commit_needed {
        steps.push(format!("Commit with message '{}'", version.commit_message()));
    } else if args.force {
        warnings.push(BoundaryWarning::NothingToCommit {
            version: version.to_string(),
        });
        steps.push("Skip commit, version file already up to date".to_string());
    } else {
        return Err(ReleaseError::NothingToCommit(version.commit_message()));
    }

    let overwrite = if args.force { " (overwriting)" } else { "" };
    steps.push(format!("Create tag {}{}", tag, overwrite));

    if let Some(remote) = &args.remote {
        steps.push(format!("Push HEAD to {}", remote));
        steps.push(format!("Push {} to {}{}", tag, remote, overwrite));
        if args.force {
            warnings.push(BoundaryWarning::RemoteTagOverwrite {
                tag: tag.name.clone(),
                remote: remote.clone(),
            });
        }
    }

    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_plan(&steps);

    Ok(ReleaseOutcome {
        version: version.to_string(),
        tag: tag.name.clone(),
        commit: None,
        pushed: false,
        dry_run: true,
        warnings,
    })
}
