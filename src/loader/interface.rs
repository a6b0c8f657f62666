use crate::error::Result;
use std::path::PathBuf;

/// Trait for loading extension trees from different sources.
pub trait ExtensionLoader {
    /// Makes the extension available on the local filesystem.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Root of the extension tree
    fn load(&self) -> Result<PathBuf>;
}
