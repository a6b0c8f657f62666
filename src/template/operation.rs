use std::path::PathBuf;

use log::debug;

use crate::error::Result;
use crate::ioutils::{dev_sidecar_path, write_file};

/// Output of one template, ready to be written into the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub target: PathBuf,
    pub content: String,
    /// Diagnostic text written to `<target>.dev` in dev mode.
    pub dev_sidecar: Option<String>,
}

impl RenderedTemplate {
    /// Writes the output, replacing whatever the copy steps left at `target`.
    pub fn write(&self) -> Result<()> {
        write_file(&self.content, &self.target)?;
        debug!("Rendered '{}'", self.target.display());

        if let Some(sidecar) = &self.dev_sidecar {
            write_file(sidecar, dev_sidecar_path(&self.target))?;
        }
        Ok(())
    }
}
