/// Main file
mod app_log;
mod archive;
mod args;
mod errors;
mod git;
mod progressbar;
mod project_dir;
mod remote;
mod scaffold;
mod user_parsed_input;

use app_log::log_env_init;
use args::*;
use errors::Error;
use remote::GithubHost;
use user_parsed_input::UserParsedInput;

use anyhow::{Context, Result};
use console::style;
use log::{error, info};
use std::{env, path::PathBuf, process::ExitCode};

fn main() -> ExitCode {
    log_env_init();
    let args = resolve_args();
    match generate(args) {
        Ok(project_dir) => {
            info!(
                "✨ {} {} {}",
                style("Done!").bold().green(),
                style("New project created").bold(),
                style(&project_dir.display()).underlined()
            );
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

/// To scaffold a project from the repository given on the command line
fn generate(args: AppArgs) -> Result<PathBuf> {
    // every relative path of the run is resolved against this directory
    let working_dir = env::current_dir().context("cannot determine the working directory")?;
    let user_parsed_input = UserParsedInput::try_from_args(&args)?;
    let host = GithubHost::new(&args.api_url, args.token.as_deref())?;
    let project_dir = scaffold::scaffold(&user_parsed_input, &working_dir, &host)?;
    Ok(project_dir)
}

/// Log `err` with its causes and pick the exit status for it.
fn report(err: &anyhow::Error) -> ExitCode {
    error!("{}", style(err).bold().red());
    for cause in err.chain().skip(1) {
        error!("  caused by: {cause}");
    }
    let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
    ExitCode::from(code)
}
