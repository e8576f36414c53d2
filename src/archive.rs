//! Zip extraction that refuses to write outside of its destination.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use indicatif::ProgressBar;
use log::debug;

use crate::errors::Error;

/// An extraction that stopped part way.
///
/// Files written before the failure are left on disk, `manifest` lists them.
#[derive(thiserror::Error, Debug)]
#[error("extraction stopped after {} entries", .manifest.len())]
pub struct ExtractError {
    pub manifest: Vec<PathBuf>,
    #[source]
    pub source: Error,
}

/// Extract every entry of the zip at `archive_path` under `dest_root`.
///
/// Returns the resolved destination of each entry, in archive order.
pub fn extract(
    archive_path: &Path,
    dest_root: &Path,
    progress: &ProgressBar,
) -> Result<Vec<PathBuf>, ExtractError> {
    let mut manifest = Vec::new();
    match extract_into(archive_path, dest_root, progress, &mut manifest) {
        Ok(()) => Ok(manifest),
        Err(source) => Err(ExtractError { manifest, source }),
    }
}

fn extract_into(
    archive_path: &Path,
    dest_root: &Path,
    progress: &ProgressBar,
    manifest: &mut Vec<PathBuf>,
) -> Result<(), Error> {
    let file = fs::File::open(archive_path)
        .map_err(|e| Error::fs("cannot open archive", archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| Error::Archive {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let root = normalize(dest_root);
    progress.set_length(archive.len() as u64);

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|source| Error::Archive {
            path: archive_path.to_path_buf(),
            source,
        })?;

        let candidate = normalize(&root.join(entry.name()));
        if !is_contained(&candidate, &root) {
            return Err(Error::PathTraversal { path: candidate });
        }
        progress.set_message(format!("Extracting: {}", entry.name()));

        if entry.is_dir() {
            fs::create_dir_all(&candidate)
                .map_err(|e| Error::fs("cannot create directory", &candidate, e))?;
        } else {
            if let Some(parent) = candidate.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::fs("cannot create directory", parent, e))?;
            }
            let mut out = fs::File::create(&candidate)
                .map_err(|e| Error::fs("cannot create file", &candidate, e))?;
            io::copy(&mut entry, &mut out)
                .map_err(|e| Error::fs("cannot write file", &candidate, e))?;
            drop(out);
            apply_mode(&candidate, entry.unix_mode())?;
        }

        debug!("extracted {}", candidate.display());
        manifest.push(candidate);
        progress.inc(1);
    }

    Ok(())
}

/// `candidate` lies below `root`, never equal to it.
fn is_contained(candidate: &Path, root: &Path) -> bool {
    candidate != root && candidate.starts_with(root)
}

/// Lexically resolve `.` and `..` without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // ".." at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir.as_os_str()),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    // setuid, setgid and sticky bits are not restored
    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))
            .map_err(|e| Error::fs("cannot set permissions on", path, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<(), Error> {
    Ok(())
}
