//! Post-scaffold steps run inside the generated project.

use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::{Error, Result};

const PACKAGE_MANAGER: &str = "yarn";

/// Runs `program args...` in `cwd`, inheriting the terminal.
///
/// # Returns
/// * `Result<()>` - `CommandExecutionError` when the command exits unsuccessfully
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let command = std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
    debug!("Running '{command}' in '{}'", cwd.display());

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?;

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::CommandExecutionError { command, status });
    }
    Ok(())
}

/// `yarn install` in the project directory.
pub fn install_packages(project_dir: &Path) -> Result<()> {
    info!("Installing dependencies with {PACKAGE_MANAGER}");
    run_command(PACKAGE_MANAGER, &["install"], project_dir)
}

/// `yarn format` in the project directory, run once dependencies are installed.
pub fn format_files(project_dir: &Path) -> Result<()> {
    info!("Formatting files");
    run_command(PACKAGE_MANAGER, &["format"], project_dir)
}
