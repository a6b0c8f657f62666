use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::DEV_SIDECAR_SUFFIX;
use crate::error::{Error, Result};

/// Creates a fresh project directory, failing if anything already exists at `output_dir`.
pub fn create_project_dir<P: AsRef<Path>>(output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    create_dir_all(output_dir)?;
    Ok(output_dir.to_path_buf())
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Removes `path` if it is a file, so the next write gets a fresh inode.
///
/// In dev mode destination files may be hard links into the templates
/// directory; replacing them in place would edit the template itself.
fn unlink_existing(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => std::fs::remove_file(path).map_err(Error::IoError),
        _ => Ok(()),
    }
}

/// Writes `content` to `dest_path`, replacing any existing file and creating parents.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    unlink_existing(dest_path)?;
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Copies `source_path` over `dest_path`, replacing any existing file.
///
/// The destination's parent directory must already exist.
pub fn replace_file<P: AsRef<Path>>(source_path: P, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    unlink_existing(dest_path)?;
    std::fs::copy(source_path.as_ref(), dest_path).map(|_| ()).map_err(Error::IoError)
}

/// Path of the dev-mode diagnostic file written next to `path`, e.g. `foo.ts.dev`.
pub fn dev_sidecar_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut sidecar = path.as_ref().as_os_str().to_owned();
    sidecar.push(DEV_SIDECAR_SUFFIX);
    PathBuf::from(sidecar)
}

/// Reads a file, treating a missing file as `None`.
pub fn read_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::IoError(e)),
    }
}

/// Depth-first list of every file under `base_dir` for which `criteria` holds.
///
/// Entries are visited in file-name order so the result is deterministic.
/// A missing `base_dir` yields an empty list.
pub fn find_files_recursive<P, F>(base_dir: P, criteria: F) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool,
{
    let base_dir = base_dir.as_ref();
    if !base_dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(base_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && criteria(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
