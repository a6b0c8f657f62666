use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path used when matching paths against patterns
pub trait PathExt {
    /// Returns this path relative to `root` as a `/`-separated string.
    ///
    /// Classification patterns and template ids are matched against this form so
    /// that they behave the same on every platform.
    ///
    /// # Examples
    /// ```
    /// use create_stylus::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("/templates/base/packages/nextjs/foo.ts");
    /// let rel = path.relative_to(Path::new("/templates/base")).unwrap();
    /// assert_eq!(rel, "packages/nextjs/foo.ts");
    /// ```
    fn relative_to(&self, root: &Path) -> Result<String>;
}

impl PathExt for Path {
    fn relative_to(&self, root: &Path) -> Result<String> {
        let relative = self.strip_prefix(root).map_err(|e| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' is not under '{}': {e}",
                self.display(),
                root.display()
            ))
        })?;
        let parts = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                Error::Other(anyhow::anyhow!(
                    "Path '{}' contains invalid Unicode characters",
                    self.display()
                ))
            })?;
        Ok(parts.join("/"))
    }
}
