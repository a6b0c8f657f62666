//! Fully-resolved options driving a single scaffold run.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;

/// Contract archetypes shipped as built-in extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinExtension {
    HelloWorld,
    Erc20,
    Erc721,
    Multicall,
}

impl BuiltinExtension {
    /// Every built-in extension, in the order they are offered to the user.
    pub const ALL: [BuiltinExtension; 4] = [
        BuiltinExtension::HelloWorld,
        BuiltinExtension::Erc20,
        BuiltinExtension::Erc721,
        BuiltinExtension::Multicall,
    ];

    /// Directory name of the extension under `extensions/` (and under an external
    /// extension's `packages/`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinExtension::HelloWorld => "hello-world",
            BuiltinExtension::Erc20 => "erc20",
            BuiltinExtension::Erc721 => "erc721",
            BuiltinExtension::Multicall => "multicall",
        }
    }
}

impl Display for BuiltinExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuiltinExtension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        BuiltinExtension::ALL
            .into_iter()
            .find(|ext| ext.as_str() == lowered)
            .ok_or_else(|| Error::ValidationError(format!("unknown extension '{s}'")))
    }
}

/// A remote repository holding an `extension/` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteExtension {
    /// Bare repository URL, e.g. `https://github.com/owner/repo`.
    pub repository: String,
    pub branch: Option<String>,
    pub trusted: bool,
}

impl RemoteExtension {
    /// The `owner/project[:branch]` form of this extension.
    pub fn argument(&self) -> String {
        let mut parts = self.repository.split('/').skip(3);
        let owner = parts.next().unwrap_or_default();
        let project = parts.next().unwrap_or_default();
        match &self.branch {
            Some(branch) => format!("{owner}/{project}:{branch}"),
            None => format!("{owner}/{project}"),
        }
    }
}

/// Where the external extension comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalExtension {
    /// Cloned from a remote repository (production mode).
    Remote(RemoteExtension),
    /// A directory under the local external extensions root (dev mode).
    Local(String),
}

impl Display for ExternalExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalExtension::Remote(remote) => write!(f, "{}", remote.argument()),
            ExternalExtension::Local(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Target directory name.
    pub project: String,
    pub install: bool,
    pub dev: bool,
    pub external_extension: Option<ExternalExtension>,
    pub extension: Option<BuiltinExtension>,
}

impl Options {
    pub fn new<S: Into<String>>(project: S) -> Self {
        Self {
            project: project.into(),
            install: false,
            dev: false,
            external_extension: None,
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: BuiltinExtension) -> Self {
        self.extension = Some(extension);
        self
    }

    pub fn with_external_extension(mut self, external: ExternalExtension) -> Self {
        self.external_extension = Some(external);
        self
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }
}
