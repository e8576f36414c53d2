//! One scaffolding run, from repository reference to project directory.
//!
//! The steps run strictly in order and the first failure ends the run:
//! resolve the branch, create the workspace, fetch, extract, locate the
//! extracted root, move it into place, optionally `git init`, and finally
//! remove the workspace again.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use console::style;
use indicatif::MultiProgress;
use log::{debug, info, warn};
use tempfile::TempDir;

use crate::archive;
use crate::errors::{Error, Result};
use crate::git;
use crate::progressbar;
use crate::project_dir::ProjectDir;
use crate::remote::RepositoryHost;
use crate::user_parsed_input::{RepoRef, UserParsedInput};

const ARCHIVE_FILE_NAME: &str = "archive.zip";
const UNZIPPED_DIR_NAME: &str = "unzipped";
const STEPS: usize = 3;

/// Scaffold the project described by `user_parsed_input` below `working_dir`.
///
/// Returns the directory the project was placed in.
pub fn scaffold(
    user_parsed_input: &UserParsedInput,
    working_dir: &Path,
    host: &impl RepositoryHost,
) -> Result<PathBuf> {
    let repo = resolve_branch(user_parsed_input, host)?;
    let project_dir = ProjectDir::resolve(user_parsed_input, working_dir);
    project_dir.check(working_dir, user_parsed_input.overwrite())?;

    info!(
        "🔧 {}",
        style(format!("Destination: {project_dir} ...")).bold().yellow()
    );

    let workspace = create_workspace(working_dir)?;
    let placed = place_project(
        user_parsed_input,
        host,
        &repo,
        workspace.path(),
        &project_dir,
    );
    if placed.is_ok() {
        init_version_control(user_parsed_input, &project_dir);
    }
    cleanup_workspace(workspace);
    placed?;

    Ok(project_dir.as_ref().to_owned())
}

/// Validate `--branch`, or ask the remote for its default branch.
fn resolve_branch(
    user_parsed_input: &UserParsedInput,
    host: &impl RepositoryHost,
) -> Result<RepoRef> {
    let location = user_parsed_input.location().clone();
    let branch = match user_parsed_input.branch() {
        Some(branch) => {
            if !host.branch_exists(&location, branch)? {
                return Err(Error::BranchNotFound {
                    branch: branch.to_owned(),
                    repository: location.web_url(),
                });
            }
            branch.to_owned()
        }
        None => host.default_branch(&location)?,
    };
    let repo = location.with_branch(branch);
    info!(
        "🔧 {}",
        style(format!(
            "Repository: {}/{} @ {}",
            repo.owner(),
            repo.name(),
            repo.branch()
        ))
        .bold()
        .yellow()
    );
    Ok(repo)
}

/// Create the workspace inside `working_dir`, so the final move is a plain rename.
fn create_workspace(working_dir: &Path) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(".templify-")
        .tempdir_in(working_dir)
        .map_err(|e| Error::fs("cannot create temporary directory in", working_dir, e))
}

fn place_project(
    user_parsed_input: &UserParsedInput,
    host: &impl RepositoryHost,
    repo: &RepoRef,
    workspace: &Path,
    project_dir: &ProjectDir,
) -> Result<()> {
    let mp = progressbar::new();
    let archive_path = fetch(&mp, host, repo, workspace)?;
    let unzipped = extract(&mp, user_parsed_input, &archive_path, workspace)?;

    let pb = progressbar::step(&mp, progressbar::spinner(), 3, STEPS);
    pb.set_message("Placing project ...");
    let root = locate_extracted_root(&unzipped)?;
    relocate(&root, project_dir, user_parsed_input.overwrite())?;
    pb.finish_with_message(format!("Done: {project_dir}"));
    Ok(())
}

fn fetch(
    mp: &MultiProgress,
    host: &impl RepositoryHost,
    repo: &RepoRef,
    workspace: &Path,
) -> Result<PathBuf> {
    let archive_path = workspace.join(ARCHIVE_FILE_NAME);
    let pb = progressbar::step(mp, progressbar::bytes(), 1, STEPS);
    pb.set_message(format!("Downloading: {}", repo.archive_url()));
    let size = host.download_archive(repo, &archive_path, &pb)?;
    debug!("downloaded {size} bytes from {}", repo.archive_url());
    pb.finish_with_message(format!("Downloaded: {}", repo.archive_url()));
    Ok(archive_path)
}

fn extract(
    mp: &MultiProgress,
    user_parsed_input: &UserParsedInput,
    archive_path: &Path,
    workspace: &Path,
) -> Result<PathBuf> {
    let unzipped = workspace.join(UNZIPPED_DIR_NAME);
    fs::create_dir_all(&unzipped)
        .map_err(|e| Error::fs("cannot create directory", &unzipped, e))?;

    let pb = progressbar::step(mp, progressbar::counter(), 2, STEPS);
    let manifest = match archive::extract(archive_path, &unzipped, &pb) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!(
                "Extraction incomplete, {} entries were written before the failure",
                err.manifest.len()
            );
            return Err(err.source);
        }
    };
    pb.finish_with_message(format!("Extracted {} entries", manifest.len()));

    for path in &manifest {
        if user_parsed_input.is_verbose() {
            info!("{}", path.display());
        } else {
            debug!("{}", path.display());
        }
    }
    Ok(unzipped)
}

/// Archives of a branch hold a single `<repo>-<branch>` folder.
fn locate_extracted_root(unzipped: &Path) -> Result<PathBuf> {
    let mut children = fs::read_dir(unzipped)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<Vec<_>>>()
        })
        .map_err(|e| Error::fs("cannot list extracted archive", unzipped, e))?;
    children.sort();

    let mut children = children.into_iter();
    let Some(root) = children.next() else {
        return Err(Error::fs(
            "archive contained no top-level folder in",
            unzipped,
            io::Error::from(io::ErrorKind::NotFound),
        ));
    };
    let rest = children.count();
    if rest > 0 {
        warn!(
            "Archive has {} top-level entries, using `{}`",
            rest + 1,
            style(root.display()).bold()
        );
    }
    Ok(root)
}

fn relocate(root: &Path, project_dir: &ProjectDir, overwrite: bool) -> Result<()> {
    if overwrite {
        project_dir.clear()?;
    }
    if let Some(parent) = project_dir.as_ref().parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::fs("cannot create directory", parent, e))?;
    }
    fs::rename(root, project_dir)
        .map_err(|e| Error::fs("cannot move project to", project_dir.as_ref(), e))
}

fn init_version_control(user_parsed_input: &UserParsedInput, project_dir: &ProjectDir) {
    if !user_parsed_input.init() {
        return;
    }
    let Some(git) = git::find_git() else {
        warn!("git not found. Repository will not be initialized automatically.");
        return;
    };
    if let Err(e) = git::init_repository(&git, project_dir.as_ref()) {
        warn!("{e}");
    }
}

fn cleanup_workspace(workspace: TempDir) {
    let path = workspace.path().to_owned();
    if let Err(e) = workspace.close() {
        warn!("Cannot remove temporary directory {}: {e}", path.display());
    }
}
