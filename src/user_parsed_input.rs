//! Input from user but after parse

use std::path::{Path, PathBuf};

use console::style;
use log::warn;
use url::Url;

use crate::errors::{Error, Result};
use crate::AppArgs;

// Contains parsed information from user.
#[derive(Debug)]
pub struct UserParsedInput {
    // where to download the archive from
    location: RepoLocation,
    branch: Option<String>,

    // `--out`, relative to the working directory when not absolute
    out: Option<PathBuf>,

    init: bool,
    overwrite: bool,
    verbose: bool,
}

impl UserParsedInput {
    /// Validate the repository argument and keep the remaining flags.
    pub fn try_from_args(args: &AppArgs) -> Result<Self> {
        let location = RepoLocation::parse(&args.repository)?;
        if location.host() != "github.com" {
            warn!(
                "Repository host `{}` is not github.com, expecting a GitHub compatible archive layout",
                style(location.host()).bold()
            );
        }

        Ok(Self {
            location,
            branch: args.branch.clone().filter(|b| !b.is_empty()),
            out: args.out.clone().filter(|o| !o.as_os_str().is_empty()),
            init: !args.no_init,
            overwrite: args.overwrite,
            verbose: args.verbose,
        })
    }

    pub const fn location(&self) -> &RepoLocation {
        &self.location
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }

    pub const fn init(&self) -> bool {
        self.init
    }

    pub const fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// `gh:owner/repo` is short for the GitHub URL of that repository
pub fn abbreviated_git_url_to_full_remote(git: impl AsRef<str>) -> Option<String> {
    let git = git.as_ref();
    git.strip_prefix("gh:")
        .map(|rest| format!("https://github.com/{rest}"))
}

/// A repository on the remote, before its branch is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    url: Url,
    owner: String,
    name: String,
}

impl RepoLocation {
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = |reason| Error::MalformedInput {
            input: input.to_owned(),
            reason,
        };

        let expanded =
            abbreviated_git_url_to_full_remote(input).unwrap_or_else(|| input.to_owned());
        let url = Url::parse(&expanded).map_err(|_| malformed("not a valid URL"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(malformed("only http and https URLs are supported"));
        }
        if url.host_str().is_none() {
            return Err(malformed("the URL has no host"));
        }

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());
        let (Some(owner), Some(name)) = (segments.next(), segments.next()) else {
            return Err(malformed("expected `<owner>/<repo>` in the path"));
        };
        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() {
            return Err(malformed("the repository name is empty"));
        }

        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
            url,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// `scheme://host[:port]` the archive is served from
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// `https://github.com/<owner>/<repo>`, without any trailing parts of the input
    pub fn web_url(&self) -> String {
        format!("{}/{}/{}", self.origin(), self.owner, self.name)
    }

    pub fn with_branch(self, branch: impl Into<String>) -> RepoRef {
        RepoRef {
            location: self,
            branch: branch.into(),
        }
    }
}

/// Owner, name and the branch to download. Fixed once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    location: RepoLocation,
    branch: String,
}

impl RepoRef {
    pub fn owner(&self) -> &str {
        self.location.owner()
    }

    pub fn name(&self) -> &str {
        self.location.name()
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn archive_url(&self) -> String {
        format!(
            "{}/archive/refs/heads/{}.zip",
            self.location.web_url(),
            self.branch
        )
    }
}
