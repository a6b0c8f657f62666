use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::options::RemoteExtension;

const CURATED_EXTENSIONS_JSON: &str = include_str!("curated.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    extension_flag_value: Option<String>,
    #[serde(default)]
    description: String,
    repository: Option<String>,
    branch: Option<String>,
}

/// A curated extension users can select by flag value alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratedExtension {
    pub flag: String,
    pub description: String,
    pub repository: String,
    pub branch: Option<String>,
}

impl CuratedExtension {
    /// The `owner/project[:branch]` identifier this entry stands for.
    pub fn argument(&self) -> String {
        RemoteExtension {
            repository: self.repository.clone(),
            branch: self.branch.clone(),
            trusted: true,
        }
        .argument()
    }
}

/// Curated extensions keyed by flag value, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CuratedRegistry {
    entries: IndexMap<String, CuratedExtension>,
}

impl CuratedRegistry {
    /// The registry shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(CURATED_EXTENSIONS_JSON)
    }

    /// Parses and validates a registry document.
    ///
    /// Every entry needs a `repository` and an `extensionFlagValue`.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Vec<RawEntry> =
            serde_json::from_str(content).map_err(|e| Error::RegistryError(e.to_string()))?;

        let mut entries = IndexMap::with_capacity(raw.len());
        for entry in raw {
            let Some(repository) = entry.repository.filter(|r| !r.is_empty()) else {
                return Err(Error::RegistryError(format!(
                    "extension must have 'repository': {:?}",
                    entry.extension_flag_value
                )));
            };
            let Some(flag) = entry.extension_flag_value.filter(|f| !f.is_empty()) else {
                return Err(Error::RegistryError(format!(
                    "extension must have 'extensionFlagValue': {repository}"
                )));
            };
            entries.insert(
                flag.clone(),
                CuratedExtension {
                    flag,
                    description: entry.description,
                    repository,
                    branch: entry.branch,
                },
            );
        }
        Ok(Self { entries })
    }

    pub fn get(&self, flag: &str) -> Option<&CuratedExtension> {
        self.entries.get(flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CuratedExtension> {
        self.entries.values()
    }
}
