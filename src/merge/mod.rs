//! Type-specific strategies for files that both the base and an extension provide.
//!
//! - `manifest`: deep merge of `package.json` documents
//! - `text`: `.gitmodules` concatenation, README replacement and copy-if-exists

pub mod manifest;
pub mod text;

pub use manifest::{merge_manifest, merge_values};
pub use text::{copy_file_if_exists, merge_gitmodules, replace_if_present};

/// What a merge helper did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Nothing to do: inputs absent or the result would be blank.
    Skipped,
    /// The target was written.
    Merged,
    /// The merge failed; the target is left as it was and the run continues.
    Failed(String),
}
