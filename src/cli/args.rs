use crate::constants::{verbosity, TEMPLATES_DIR_ENV};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// CLI arguments for create-stylus.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the project directory to create.
    #[arg(value_name = "PROJECT")]
    pub project: Option<String>,

    /// Contract extension: a built-in name, `none`, a curated extension,
    /// `owner/repo[:branch]` or a repository URL.
    #[arg(short, long, value_name = "ID")]
    pub extension: Option<String>,

    /// Do not run `yarn install` and `yarn format` after scaffolding.
    #[arg(long = "skip-install", visible_alias = "skip")]
    pub skip_install: bool,

    /// Link template files instead of copying them and write `.dev` diagnostics.
    #[arg(long)]
    pub dev: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Never prompt; missing options take their defaults.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Directory holding the `base` and `extensions` templates.
    #[arg(long = "templates-dir", value_name = "DIR", env = TEMPLATES_DIR_ENV)]
    pub templates_dir: Option<PathBuf>,
}

/// Parse command line arguments, exiting with usage on error.
pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::DEFAULT => LevelFilter::Warn,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
