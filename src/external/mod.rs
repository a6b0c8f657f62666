//! Resolution of external extensions.
//!
//! An external extension is either a third-party repository (production mode)
//! or a directory under the local external extensions root (dev mode).

pub mod identifier;
pub mod probe;
pub mod registry;

use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;

use crate::constants::remote::TRUSTED_ORGANIZATIONS;
use crate::constants::{EXTERNAL_EXTENSION_ROOT, PACKAGES_DIR};
use crate::error::{Error, Result};
use crate::options::{BuiltinExtension, ExternalExtension, RemoteExtension};

pub use identifier::ExtensionIdentifier;
pub use probe::{HttpProbe, RemoteProbe};
pub use registry::{CuratedExtension, CuratedRegistry};

pub struct ExtensionResolver<'a> {
    probe: &'a dyn RemoteProbe,
    registry: &'a CuratedRegistry,
    /// Dev-mode external extensions directory.
    local_root: PathBuf,
}

/// Message for the operator when an extension comes from an untrusted source.
pub fn trust_advisory(external: &ExternalExtension) -> Option<String> {
    match external {
        ExternalExtension::Remote(remote) if !remote.trusted => Some(format!(
            "You are using a third-party extension. Make sure you trust the source of {}",
            remote.repository
        )),
        _ => None,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<'a> ExtensionResolver<'a> {
    pub fn new<P: AsRef<Path>>(
        probe: &'a dyn RemoteProbe,
        registry: &'a CuratedRegistry,
        local_root: P,
    ) -> Self {
        Self { probe, registry, local_root: local_root.as_ref().to_path_buf() }
    }

    fn is_trusted(&self, owner: &str, raw: &str) -> bool {
        TRUSTED_ORGANIZATIONS.contains(&owner.to_lowercase().as_str())
            || self.registry.get(raw).is_some()
    }

    /// Resolves a user-supplied identifier.
    ///
    /// In dev mode `raw` names a directory under the local root. Otherwise it is
    /// a curated flag value, an `owner/project[:branch]` shorthand or a
    /// repository URL, and the repository must answer `200`. Untrusted sources
    /// are only flagged, see [`trust_advisory`].
    ///
    /// # Arguments
    /// * `raw` - Identifier as given on the command line
    /// * `dev` - Whether to look locally instead of remotely
    ///
    /// # Returns
    /// * `Result<ExternalExtension>` - The resolved extension
    pub fn resolve(&self, raw: &str, dev: bool) -> Result<ExternalExtension> {
        if dev {
            if !self.local_root.join(raw).is_dir() {
                return Err(Error::LocalExtensionNotFound { name: raw.to_string() });
            }
            return Ok(ExternalExtension::Local(raw.to_string()));
        }

        let argument = self.registry.get(raw).map(CuratedExtension::argument);
        let identifier = ExtensionIdentifier::parse(argument.as_deref().unwrap_or(raw))?;
        let trusted = self.is_trusted(&identifier.owner, raw);

        let repository = identifier.repository_url();
        let check_url = identifier.branch_url();
        let status = self.probe.status(&check_url)?;
        debug!("Existence check of '{check_url}' returned {status}");
        if status != 200 {
            return Err(Error::ExtensionNotFound { url: repository });
        }

        Ok(ExternalExtension::Remote(RemoteExtension {
            repository,
            branch: identifier.branch,
            trusted,
        }))
    }

    /// Root of a local external extension's tree.
    pub fn local_extension_root(&self, name: &str) -> PathBuf {
        self.local_root.join(name).join(EXTERNAL_EXTENSION_ROOT)
    }

    /// Lists which built-in extension kinds the external extension provides.
    ///
    /// Dev mode reads the local `extension/packages` directory. Otherwise one
    /// probe per kind runs concurrently: `200` means present, `404` absent and
    /// any other status is an error. A probe that fails to connect counts as
    /// present.
    pub fn list_sub_extensions(&self, external: &ExternalExtension) -> Result<Vec<BuiltinExtension>> {
        match external {
            ExternalExtension::Local(name) => self.list_local(name),
            ExternalExtension::Remote(remote) => self.list_remote(remote),
        }
    }

    fn list_local(&self, name: &str) -> Result<Vec<BuiltinExtension>> {
        let packages = self.local_extension_root(name).join(PACKAGES_DIR);
        if !packages.is_dir() {
            return Ok(Vec::new());
        }

        let mut present = Vec::new();
        for entry in std::fs::read_dir(&packages)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(dir) = entry.file_name().to_str() {
                present.push(dir.to_string());
            }
        }
        Ok(BuiltinExtension::ALL
            .into_iter()
            .filter(|ext| present.iter().any(|dir| dir == ext.as_str()))
            .collect())
    }

    fn list_remote(&self, remote: &RemoteExtension) -> Result<Vec<BuiltinExtension>> {
        let mut identifier = ExtensionIdentifier::parse(&remote.repository)?;
        identifier.branch = remote.branch.clone();

        let found = BuiltinExtension::ALL
            .par_iter()
            .map(|ext| self.probe_sub_extension(&identifier, *ext))
            .collect::<Result<Vec<_>>>()?;
        Ok(found.into_iter().flatten().collect())
    }

    fn probe_sub_extension(
        &self,
        identifier: &ExtensionIdentifier,
        extension: BuiltinExtension,
    ) -> Result<Option<BuiltinExtension>> {
        let url = identifier.packages_url(extension.as_str());
        match self.probe.status(&url) {
            Ok(200) => Ok(Some(extension)),
            Ok(404) => Ok(None),
            Ok(status) => Err(Error::SubExtensionCheckFailed {
                extension: capitalize(extension.as_str()),
                status,
                url,
            }),
            Err(e) => {
                warn!("{e}");
                Ok(Some(extension))
            }
        }
    }
}
