use crate::error::{Error, Result};
use crate::loader::interface::ExtensionLoader;
use std::path::{Path, PathBuf};

/// Loader for extension trees already on the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> ExtensionLoader for LocalLoader<P> {
    /// Checks that the tree exists.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to the extension directory
    fn load(&self) -> Result<PathBuf> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: path.display().to_string(),
            });
        }
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_existing_directory() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(LocalLoader::new(tmp.path()).load().unwrap(), tmp.path());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = LocalLoader::new(tmp.path().join("erc20")).load();
        assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));
    }
}
