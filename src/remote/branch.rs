use reqwest::StatusCode;
use serde::Deserialize;

use crate::errors::{Error, Result};

#[derive(Deserialize, Debug)]
struct RepositoryMetadata {
    default_branch: String,
}

pub(super) fn parse_default_branch(url: &str, body: &str) -> Result<String> {
    let metadata: RepositoryMetadata =
        serde_json::from_str(body).map_err(|e| Error::MetadataParse {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
    if metadata.default_branch.is_empty() {
        return Err(Error::MetadataParse {
            url: url.to_owned(),
            reason: "`default_branch` is empty".to_owned(),
        });
    }
    Ok(metadata.default_branch)
}

/// Anything but an explicit "not found" counts as an existing branch.
pub(super) fn exists_from_status(status: StatusCode) -> bool {
    status != StatusCode::NOT_FOUND
}
