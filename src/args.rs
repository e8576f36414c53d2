use std::path::PathBuf;

use clap::Parser;

use crate::remote::DEFAULT_API_URL;

/// Styles from <https://github.com/rust-lang/cargo/blob/master/src/cargo/util/style.rs>
mod style {
    use anstyle::*;
    use clap::builder::Styles;

    const HEADER: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
    const USAGE: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
    const LITERAL: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
    const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();
    const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
    const VALID: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
    const INVALID: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

    pub const STYLES: Styles = {
        Styles::styled()
            .header(HEADER)
            .usage(USAGE)
            .literal(LITERAL)
            .placeholder(PLACEHOLDER)
            .error(ERROR)
            .valid(VALID)
            .invalid(INVALID)
    };
}

mod heading {
    pub const SOURCE_PARAMETERS: &str = "Source Parameters";
    pub const OUTPUT_PARAMETERS: &str = "Output Parameters";
    pub const API_PARAMETERS: &str = "API Parameters";
}

#[derive(Parser, Clone, Debug)]
#[command(
    name = "templify",
    arg_required_else_help(true),
    version,
    about,
    next_line_help(false),
    styles(style::STYLES)
)]
pub struct AppArgs {
    /// GitHub repository to start from, e.g. `https://github.com/owner/repo` or the
    /// abbreviated `gh:owner/repo`
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    /// The name of the branch to download. Defaults to the repository's default branch
    #[arg(short, long, value_name = "NAME", help_heading = heading::SOURCE_PARAMETERS)]
    pub branch: Option<String>,

    /// Destination path of the project. Defaults to the repository name
    #[arg(short, long, value_parser, value_name = "PATH", help_heading = heading::OUTPUT_PARAMETERS)]
    pub out: Option<PathBuf>,

    /// Do not initialize a git repository in the new project
    #[arg(long, action, help_heading = heading::OUTPUT_PARAMETERS)]
    pub no_init: bool,

    /// Replace the destination if it already exists
    #[arg(long, action, help_heading = heading::OUTPUT_PARAMETERS)]
    pub overwrite: bool,

    /// Enables more verbose output, listing every extracted path.
    #[arg(long, short, action)]
    pub verbose: bool,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "TEMPLIFY_API_URL", default_value = DEFAULT_API_URL, value_name = "URL", help_heading = heading::API_PARAMETERS)]
    pub api_url: String,

    /// Token sent to the GitHub REST API, raises its rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN", help_heading = heading::API_PARAMETERS)]
    pub token: Option<String>,
}

impl Default for AppArgs {
    fn default() -> Self {
        Self {
            repository: String::new(),
            branch: None,
            out: None,
            no_init: false,
            overwrite: false,
            verbose: false,
            api_url: DEFAULT_API_URL.to_owned(),
            token: None,
        }
    }
}

/// To get the arguments list from terminal
pub fn resolve_args() -> AppArgs {
    AppArgs::parse()
}
