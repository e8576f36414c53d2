use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use indicatif::ProgressBar;
use reqwest::blocking::Client;

use crate::errors::{Error, Result};

/// Stream the body of `url` into `target`, replacing whatever was there.
///
/// Returns the number of bytes written.
pub fn download_file(
    client: &Client,
    url: &str,
    target: &Path,
    progress: &ProgressBar,
) -> Result<u64> {
    let response = client.get(url).send().map_err(|source| Error::Network {
        url: url.to_owned(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }
    if let Some(len) = response.content_length() {
        progress.set_length(len);
    }

    let mut out = File::create(target).map_err(|e| Error::fs("cannot create file", target, e))?;
    let transfer = |source| Error::Transfer {
        url: url.to_owned(),
        path: target.to_owned(),
        source,
    };
    let written = io::copy(&mut progress.wrap_read(response), &mut out).map_err(transfer)?;
    out.flush().map_err(transfer)?;

    Ok(written)
}
