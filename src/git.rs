//! Version-control operations the scaffolder relies on.

use std::path::Path;

use git2::{build::RepoBuilder, IndexAddOption, Repository, RepositoryInitOptions, Signature};
use log::debug;

use crate::error::Result;

/// Fallback identity for the first commit when git has no user configured.
const FALLBACK_AUTHOR_NAME: &str = "create-stylus";
const FALLBACK_AUTHOR_EMAIL: &str = "create-stylus@localhost";

/// Trait for the version-control collaborator.
pub trait VersionControl {
    /// Clones `url` into `destination`, checking out `branch` when given.
    ///
    /// `destination` must be missing or empty.
    fn clone_repository(&self, url: &str, branch: Option<&str>, destination: &Path) -> Result<()>;

    /// Initialises a repository in `directory` whose HEAD points at `branch`.
    fn init_repository(&self, directory: &Path, branch: &str) -> Result<()>;

    /// Stages the whole working tree and commits it.
    fn commit_all(&self, directory: &Path, message: &str) -> Result<()>;
}

/// [`VersionControl`] backed by libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2;

impl VersionControl for Git2 {
    fn clone_repository(&self, url: &str, branch: Option<&str>, destination: &Path) -> Result<()> {
        debug!("Cloning '{url}' into '{}'", destination.display());

        let mut builder = RepoBuilder::new();
        if let Some(branch) = branch {
            builder.branch(branch);
        }
        builder.clone(url, destination)?;
        Ok(())
    }

    fn init_repository(&self, directory: &Path, branch: &str) -> Result<()> {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(branch);
        Repository::init_opts(directory, &opts)?;
        debug!("Initialised repository in '{}' on '{branch}'", directory.display());
        Ok(())
    }

    fn commit_all(&self, directory: &Path, message: &str) -> Result<()> {
        let repo = Repository::open(directory)?;

        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;

        let signature = match repo.signature() {
            Ok(signature) => signature,
            Err(_) => Signature::now(FALLBACK_AUTHOR_NAME, FALLBACK_AUTHOR_EMAIL)?,
        };
        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!("Committed '{}'", directory.display());
        Ok(())
    }
}
