use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

use console::style;
use log::warn;

use crate::archive::normalize;
use crate::errors::{Error, Result};
use crate::user_parsed_input::UserParsedInput;

/// Where the scaffolded project ends up.
#[derive(Debug, PartialEq)]
pub struct ProjectDir(PathBuf);

impl AsRef<Path> for ProjectDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl Display for ProjectDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.display().fmt(f)
    }
}

impl ProjectDir {
    /// `--out` when given, the repository name otherwise, below `working_dir`.
    pub fn resolve(user_parsed_input: &UserParsedInput, working_dir: &Path) -> Self {
        let dir_name = user_parsed_input.out().map_or_else(
            || PathBuf::from(user_parsed_input.location().name()),
            Path::to_path_buf,
        );
        // an absolute `--out` replaces the working directory
        Self(working_dir.join(dir_name))
    }

    /// Refuse an existing destination unless it may be replaced.
    ///
    /// The working directory and its ancestors are never a valid destination.
    pub fn check(&self, working_dir: &Path, overwrite: bool) -> Result<()> {
        if normalize(working_dir).starts_with(normalize(&self.0)) {
            return Err(Error::fs(
                "destination must not contain the working directory",
                &self.0,
                io::Error::from(io::ErrorKind::InvalidInput),
            ));
        }
        if self.0.symlink_metadata().is_ok() && !overwrite {
            return Err(Error::fs(
                "destination already exists, pass --overwrite to replace",
                &self.0,
                io::Error::from(io::ErrorKind::AlreadyExists),
            ));
        }
        Ok(())
    }

    /// Remove an existing destination so the project can be moved in.
    pub fn clear(&self) -> Result<()> {
        let Ok(metadata) = self.0.symlink_metadata() else {
            return Ok(());
        };
        let removed = if metadata.is_dir() {
            std::fs::remove_dir_all(&self.0)
        } else {
            std::fs::remove_file(&self.0)
        };
        removed.map_err(|e| Error::fs("cannot remove existing destination", &self.0, e))?;
        warn!(
            "{}",
            style(format!("Overwrite existing directory: {}", self.0.display()))
                .bold()
                .yellow()
        );
        Ok(())
    }
}
