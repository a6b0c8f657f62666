use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::ioutils::{create_dir_all, read_if_exists, replace_file, write_file};

use super::MergeOutcome;

/// Logs a failed best-effort merge and turns it into [`MergeOutcome::Failed`].
fn recover(what: &str, result: Result<MergeOutcome>) -> MergeOutcome {
    result.unwrap_or_else(|e| {
        warn!("Warning: Failed to {what}: {e}");
        MergeOutcome::Failed(e.to_string())
    })
}

fn concatenate(target: &str, source: &str) -> String {
    let separator = if !target.is_empty() && !source.is_empty() { "\n" } else { "" };
    format!("{target}{separator}{source}")
}

fn try_merge_gitmodules(target_path: &Path, source_path: &Path) -> Result<MergeOutcome> {
    let target = read_if_exists(target_path)?;
    let source = read_if_exists(source_path)?;
    if target.is_none() && source.is_none() {
        return Ok(MergeOutcome::Skipped);
    }

    let merged = concatenate(
        target.as_deref().unwrap_or_default(),
        source.as_deref().unwrap_or_default(),
    );
    if merged.trim().is_empty() {
        return Ok(MergeOutcome::Skipped);
    }
    write_file(&merged, target_path)?;
    debug!("Merged '{}' into '{}'", source_path.display(), target_path.display());
    Ok(MergeOutcome::Merged)
}

/// Appends the source `.gitmodules` to the target one.
///
/// Missing files read as empty. The target is only written when the combined
/// content is not blank. Failures are logged and reported, never raised.
pub fn merge_gitmodules(target_path: &Path, source_path: &Path) -> MergeOutcome {
    recover("merge .gitmodules files", try_merge_gitmodules(target_path, source_path))
}

fn try_replace(target_path: &Path, source_path: &Path) -> Result<MergeOutcome> {
    if !source_path.exists() {
        return Ok(MergeOutcome::Skipped);
    }
    replace_file(source_path, target_path)?;
    debug!("Replaced '{}' with '{}'", target_path.display(), source_path.display());
    Ok(MergeOutcome::Merged)
}

/// Replaces the target with the source file when the source exists.
///
/// Used for documentation: an extension README wins outright, otherwise the
/// base one is kept.
pub fn replace_if_present(target_path: &Path, source_path: &Path) -> MergeOutcome {
    recover("handle README file", try_replace(target_path, source_path))
}

/// Copies `file_name` from `source_dir` to `target_dir` if the source has it.
///
/// `target_dir` is created when missing.
pub fn copy_file_if_exists(source_dir: &Path, target_dir: &Path, file_name: &str) -> MergeOutcome {
    let source = source_dir.join(file_name);
    if !source.exists() {
        return MergeOutcome::Skipped;
    }
    let result = create_dir_all(target_dir)
        .and_then(|_| try_replace(&target_dir.join(file_name), &source));
    recover(&format!("copy {file_name}"), result)
}
