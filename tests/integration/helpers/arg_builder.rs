use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;

/// The binary, isolated from proxies and settings of the calling environment.
pub fn binary() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for var in [
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
        "GITHUB_TOKEN",
        "TEMPLIFY_API_URL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_PROXY", "127.0.0.1");
    cmd
}

pub trait ArgBuilder {
    fn arg_branch(&mut self, branch: &str) -> &mut Self;
    fn arg_out(&mut self, out: impl AsRef<Path>) -> &mut Self;
    fn arg_api_url(&mut self, url: &str) -> &mut Self;
    fn arg_no_init(&mut self) -> &mut Self;
}

impl ArgBuilder for Command {
    fn arg_branch(&mut self, branch: &str) -> &mut Self {
        self.arg("--branch").arg(branch)
    }

    fn arg_out(&mut self, out: impl AsRef<Path>) -> &mut Self {
        self.arg("--out").arg(out.as_ref())
    }

    fn arg_api_url(&mut self, url: &str) -> &mut Self {
        self.arg("--api-url").arg(url)
    }

    fn arg_no_init(&mut self) -> &mut Self {
        self.arg("--no-init")
    }
}
