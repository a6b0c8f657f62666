use std::path::{Path, PathBuf};

use log::debug;

use crate::classify::{template_output_path, template_target_name, FileRole};
use crate::error::Result;
use crate::ext::PathExt;
use crate::ioutils::find_files_recursive;

/// One template-marker file found under a source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Absolute location of the template file.
    pub path: PathBuf,
    /// Location relative to the source root, `/`-separated.
    pub relative_path: String,
    /// Where the output lands relative to the project root. Also the template id.
    pub output_path: String,
    /// Provenance shown in messages, e.g. `extension erc20`.
    pub source: String,
}

impl TemplateDescriptor {
    /// Finds every template under `root`, in file-name order.
    ///
    /// # Arguments
    /// * `root` - Source root (base, extension or external extension)
    /// * `source` - Provenance label given to every descriptor
    ///
    /// # Returns
    /// * `Result<Vec<TemplateDescriptor>>` - Empty when `root` does not exist
    pub fn discover(root: &Path, source: &str) -> Result<Vec<Self>> {
        let files = find_files_recursive(root, |path| {
            path.relative_to(root)
                .is_ok_and(|relative| FileRole::Template.matches(&relative, false))
        })?;

        let mut descriptors = Vec::with_capacity(files.len());
        for path in files {
            let relative_path = path.relative_to(root)?;
            if let Some(output_path) = template_output_path(&relative_path) {
                debug!("Found template '{relative_path}' in {source}");
                descriptors.push(Self {
                    path,
                    relative_path,
                    output_path,
                    source: source.to_string(),
                });
            }
        }
        Ok(descriptors)
    }

    /// The output file name, e.g. `scaffold.config.ts`.
    pub fn target_name(&self) -> String {
        template_target_name(&self.relative_path).unwrap_or_else(|| self.output_path.clone())
    }
}
