//! svcs CLI
//!
//! Command-line interface for svcs

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use svcs_core::logging_facility::{init_with_default_filter, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "svcs")]
#[command(about = "svcs - a small local version control system", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Storage root; relative paths resolve against the working directory
    #[arg(long, env = "SVCS_ROOT", default_value = "vcs")]
    pub root: PathBuf,

    /// Directory holding the tracked files
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,

    /// Match index entries and commit ids exactly instead of by substring
    #[arg(long, env = "SVCS_EXACT")]
    pub exact: bool,

    /// Log engine operations to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Show the command listing
    #[arg(long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Command name followed by its argument
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

fn init_logging(verbose: bool) {
    let profile = match std::env::var("SVCS_LOG_FORMAT").as_deref() {
        Ok("json") => Profile::Production,
        _ => Profile::Development,
    };
    let default_filter = if verbose {
        profile.default_filter()
    } else {
        "svcs=warn"
    };
    init_with_default_filter(profile, default_filter);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::execute(cli) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
