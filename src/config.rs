//! Locations of the data the scaffolder reads.

use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{BASE_DIR, EXTENSIONS_DIR, EXTERNAL_EXTENSIONS_DIR};
use crate::error::{Error, Result};
use crate::options::BuiltinExtension;

/// Templates directory of the source tree the binary was built from.
pub const BUILD_TEMPLATES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Name of the templates directory shipped next to the executable.
const TEMPLATES_DIR_NAME: &str = "templates";

/// `<directory of current executable>/templates`, if the executable path is known.
fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(TEMPLATES_DIR_NAME)))
}

/// Ordered places the bundled templates may live in.
///
/// A distributed binary ships them next to itself; a binary run from its
/// build tree finds them in the crate sources.
fn candidate_templates_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(exe_sibling) = exe_sibling_templates() {
        candidates.push(exe_sibling);
    }
    candidates.push(PathBuf::from(BUILD_TEMPLATES_DIR));
    candidates
}

/// First candidate that is a directory, else the last one tried.
fn locate_templates_dir(candidates: Vec<PathBuf>) -> PathBuf {
    let fallback = candidates.last().cloned().unwrap_or_else(|| PathBuf::from(BUILD_TEMPLATES_DIR));
    candidates
        .into_iter()
        .find(|candidate| {
            debug!("Looking for templates in '{}'", candidate.display());
            candidate.is_dir()
        })
        .unwrap_or(fallback)
}

/// Resolved tool directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Holds `base/` and `extensions/<name>/`.
    pub templates_dir: PathBuf,
    /// Dev-mode external extensions, a sibling of the templates directory.
    pub external_extensions_dir: PathBuf,
}

impl ToolPaths {
    /// Resolves the tool directories.
    ///
    /// # Arguments
    /// * `templates_dir` - Override of the templates directory; otherwise the
    ///   one next to the executable, then the one in the build tree
    ///
    /// # Returns
    /// * `Result<ToolPaths>` - Fails when the templates directory does not exist
    pub fn resolve(templates_dir: Option<&Path>) -> Result<Self> {
        let templates_dir = match templates_dir {
            Some(dir) => dir.to_path_buf(),
            None => locate_templates_dir(candidate_templates_dirs()),
        };
        if !templates_dir.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: templates_dir.display().to_string(),
            });
        }

        let templates_dir = std::fs::canonicalize(&templates_dir)?;
        let external_extensions_dir = templates_dir
            .parent()
            .unwrap_or(&templates_dir)
            .join(EXTERNAL_EXTENSIONS_DIR);
        debug!(
            "Using templates '{}' and external extensions '{}'",
            templates_dir.display(),
            external_extensions_dir.display()
        );

        Ok(Self { templates_dir, external_extensions_dir })
    }

    pub fn base_dir(&self) -> PathBuf {
        self.templates_dir.join(BASE_DIR)
    }

    pub fn extension_dir(&self, extension: BuiltinExtension) -> PathBuf {
        self.templates_dir.join(EXTENSIONS_DIR).join(extension.as_str())
    }
}
