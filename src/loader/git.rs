use std::path::{Path, PathBuf};

use log::info;

use crate::constants::EXTERNAL_EXTENSION_ROOT;
use crate::error::{Error, Result};
use crate::git::VersionControl;
use crate::loader::interface::ExtensionLoader;
use crate::options::RemoteExtension;

/// Loader for extensions hosted in a git repository.
///
/// The repository is cloned into `scratch`; its `extension/` directory is the
/// extension root. The caller owns `scratch` and removes it afterwards.
pub struct GitLoader<'a> {
    vcs: &'a dyn VersionControl,
    remote: &'a RemoteExtension,
    scratch: &'a Path,
}

impl<'a> GitLoader<'a> {
    /// Creates a new GitLoader instance.
    pub fn new(vcs: &'a dyn VersionControl, remote: &'a RemoteExtension, scratch: &'a Path) -> Self {
        Self { vcs, remote, scratch }
    }
}

impl ExtensionLoader for GitLoader<'_> {
    /// Clones the repository, on the requested branch if any.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to `<scratch>/extension`
    fn load(&self) -> Result<PathBuf> {
        info!("Cloning external extension '{}'", self.remote.argument());
        self.vcs
            .clone_repository(&self.remote.repository, self.remote.branch.as_deref(), self.scratch)?;

        let root = self.scratch.join(EXTERNAL_EXTENSION_ROOT);
        if !root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: root.display().to_string(),
            });
        }
        Ok(root)
    }
}
