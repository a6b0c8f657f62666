//! Recursive, non-destructive tree copying.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use log::{debug, trace};
use rayon::prelude::*;

use crate::constants::PLATFORM_METADATA_FILES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::ioutils::create_dir_all;

/// How regular files reach the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStrategy {
    /// Byte-for-byte duplicate.
    Copy,
    /// Hard link sharing the template's inode, so template edits show up live.
    HardLink,
}

impl CopyStrategy {
    /// Hard links in dev mode, copies otherwise.
    pub fn for_mode(dev: bool) -> Self {
        if dev {
            CopyStrategy::HardLink
        } else {
            CopyStrategy::Copy
        }
    }

    fn transfer(&self, source: &Path, destination: &Path) -> Result<()> {
        match self {
            CopyStrategy::Copy => fs::copy(source, destination).map(|_| ()),
            CopyStrategy::HardLink => fs::hard_link(source, destination),
        }
        .map_err(Error::IoError)
    }
}

fn is_platform_metadata(name: &OsStr) -> bool {
    PLATFORM_METADATA_FILES.iter().any(|meta| name == OsStr::new(meta))
}

/// Copies every entry under `source` into `destination`.
///
/// `exclude` receives each entry's path relative to `source` (`/`-separated) and
/// whether it is a directory; excluded directories are not descended into.
/// Existing destination files are never overwritten. Sibling entries are
/// processed in parallel and the call returns once the whole subtree is done.
///
/// # Arguments
/// * `source` - Directory to copy from
/// * `destination` - Directory to copy into, created if missing
/// * `strategy` - Whether files are copied or hard-linked
/// * `exclude` - Predicate selecting entries to skip
pub fn copy_tree<F>(
    source: &Path,
    destination: &Path,
    strategy: CopyStrategy,
    exclude: F,
) -> Result<()>
where
    F: Fn(&str, bool) -> bool + Sync,
{
    debug!(
        "Copying '{}' into '{}' ({:?})",
        source.display(),
        destination.display(),
        strategy
    );
    create_dir_all(destination)?;
    copy_dir(source, source, destination, strategy, &exclude)
}

fn copy_dir<F>(
    root: &Path,
    dir: &Path,
    dest_dir: &Path,
    strategy: CopyStrategy,
    exclude: &F,
) -> Result<()>
where
    F: Fn(&str, bool) -> bool + Sync,
{
    let entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;

    entries.par_iter().try_for_each(|entry| {
        let name = entry.file_name();
        if is_platform_metadata(&name) {
            return Ok(());
        }

        let path = entry.path();
        let is_dir = entry.file_type()?.is_dir();
        let relative = path.relative_to(root)?;
        if exclude(&relative, is_dir) {
            trace!("Excluding '{relative}'");
            return Ok(());
        }

        let dest = dest_dir.join(&name);
        if is_dir {
            create_dir_all(&dest)?;
            copy_dir(root, &path, &dest, strategy, exclude)
        } else if fs::symlink_metadata(&dest).is_ok() {
            debug!("Keeping existing '{}'", dest.display());
            Ok(())
        } else {
            strategy.transfer(&path, &dest)
        }
    })
}
