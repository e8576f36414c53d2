//! Failures a scaffolding run can end with

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request to `{url}` failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot save `{url}` to `{}`", .path.display())]
    Transfer {
        url: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("`{url}` answered with status {status}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("cannot read repository metadata from `{url}`: {reason}")]
    MetadataParse { url: String, reason: String },
    #[error("{}: illegal file path", .path.display())]
    PathTraversal { path: PathBuf },
    #[error("{action} `{}`", .path.display())]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read zip archive `{}`", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("`{input}` is not a GitHub repository URL: {reason}")]
    MalformedInput { input: String, reason: &'static str },
    #[error("The branch {branch} not exists for the repository {repository}")]
    BranchNotFound { branch: String, repository: String },
    #[error("`{tool}` did not complete: {reason}")]
    ExternalTool { tool: String, reason: String },
}

impl Error {
    pub(crate) fn fs(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Process exit status for a run that ended with this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MalformedInput { .. } => 2,
            _ => 1,
        }
    }
}
