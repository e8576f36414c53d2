//! The GitHub side of a run: branch metadata and the zip archive.

mod branch;
mod download;

use std::path::Path;
use std::time::Duration;

use indicatif::ProgressBar;
use reqwest::blocking::{Client, RequestBuilder, Response};

use crate::errors::{Error, Result};
use crate::user_parsed_input::{RepoLocation, RepoRef};

pub use download::download_file;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Everything a run needs from the remote.
pub trait RepositoryHost {
    /// Name of the branch the repository checks out by default.
    fn default_branch(&self, repo: &RepoLocation) -> Result<String>;

    /// `false` only when the remote explicitly reports the branch as missing.
    fn branch_exists(&self, repo: &RepoLocation, branch: &str) -> Result<bool>;

    /// Store the zip archive of `repo` at `target`, returning its size in bytes.
    fn download_archive(
        &self,
        repo: &RepoRef,
        target: &Path,
        progress: &ProgressBar,
    ) -> Result<u64>;
}

/// GitHub's REST API for metadata, plain archive links for the download.
pub struct GithubHost {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubHost {
    pub fn new(api_url: &str, token: Option<&str>) -> Result<Self> {
        // requests block as long as the transport allows
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .map_err(|source| Error::Network {
                url: api_url.to_owned(),
                source,
            })?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_owned(),
            token: token.filter(|t| !t.is_empty()).map(str::to_owned),
        })
    }

    fn repo_endpoint(&self, repo: &RepoLocation) -> String {
        format!("{}/repos/{}/{}", self.api_url, repo.owner(), repo.name())
    }

    fn api_get(&self, url: &str) -> Result<Response> {
        let mut request: RequestBuilder = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request.send().map_err(|source| Error::Network {
            url: url.to_owned(),
            source,
        })
    }
}

impl RepositoryHost for GithubHost {
    fn default_branch(&self, repo: &RepoLocation) -> Result<String> {
        let url = self.repo_endpoint(repo);
        let response = self.api_get(&url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus { url, status });
        }
        let body = response.text().map_err(|source| Error::Network {
            url: url.clone(),
            source,
        })?;
        branch::parse_default_branch(&url, &body)
    }

    fn branch_exists(&self, repo: &RepoLocation, branch: &str) -> Result<bool> {
        let url = format!("{}/branches/{branch}", self.repo_endpoint(repo));
        let response = self.api_get(&url)?;
        Ok(branch::exists_from_status(response.status()))
    }

    fn download_archive(
        &self,
        repo: &RepoRef,
        target: &Path,
        progress: &ProgressBar,
    ) -> Result<u64> {
        download_file(&self.client, &repo.archive_url(), target, progress)
    }
}
