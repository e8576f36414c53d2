use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::{Error, Result};

/// Location of the `git` executable, if there is one on `PATH`.
pub fn find_git() -> Option<PathBuf> {
    which::which("git").ok()
}

/// Run `git init <project_dir>`, sharing our stdin and stdout.
pub fn init_repository(git: &Path, project_dir: &Path) -> Result<()> {
    let tool = || format!("{} init", git.display());
    let status = Command::new(git)
        .arg("init")
        .arg(project_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .status()
        .map_err(|e| Error::ExternalTool {
            tool: tool(),
            reason: e.to_string(),
        })?;
    if !status.success() {
        return Err(Error::ExternalTool {
            tool: tool(),
            reason: format!("exited with {status}"),
        });
    }
    Ok(())
}
