use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::constants::remote::GITHUB_BASE_URL;
use crate::error::{Error, Result};

static SHORTHAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/]+/[^/]+(:[^/]+)?$").unwrap());

/// A parsed `owner/project[:branch]` or repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionIdentifier {
    /// Scheme and host, e.g. `https://github.com/`.
    pub base_url: String,
    pub owner: String,
    pub project: String,
    pub branch: Option<String>,
}

impl ExtensionIdentifier {
    /// Parses either grammar.
    ///
    /// A URL has its owner, project and branch read positionally from the path
    /// (`/<owner>/<project>/tree/<branch>`); anything after the branch is ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.starts_with("https://") {
            return Self::parse_url(raw);
        }
        if !SHORTHAND_RE.is_match(raw) {
            return Err(Error::InvalidExtensionFormat);
        }

        let (owner, rest) = raw.split_once('/').ok_or(Error::InvalidExtensionFormat)?;
        // Only the segment after the first `:` names the branch; an empty one means none.
        let mut parts = rest.split(':');
        let project = parts.next().unwrap_or(rest);
        let branch = parts.next().filter(|b| !b.is_empty()).map(str::to_string);
        Ok(Self {
            base_url: GITHUB_BASE_URL.to_string(),
            owner: owner.to_string(),
            project: project.to_string(),
            branch,
        })
    }

    fn parse_url(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|_| Error::InvalidExtensionFormat)?;
        let host = url.host_str().ok_or(Error::InvalidExtensionFormat)?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let (owner, project) = match segments.as_slice() {
            [owner, project, ..] => (owner.to_string(), project.trim_end_matches(".git").to_string()),
            _ => return Err(Error::InvalidExtensionFormat),
        };
        let branch = match segments.as_slice() {
            [_, _, "tree", branch, ..] => Some(branch.to_string()),
            _ => None,
        };

        Ok(Self { base_url: format!("https://{host}/"), owner, project, branch })
    }

    /// Bare repository URL, e.g. `https://github.com/owner/project`.
    pub fn repository_url(&self) -> String {
        format!("{}{}/{}", self.base_url, self.owner, self.project)
    }

    /// The URL checked for existence: the branch tree when a branch is given.
    pub fn branch_url(&self) -> String {
        match &self.branch {
            Some(branch) => format!("{}/tree/{branch}", self.repository_url()),
            None => self.repository_url(),
        }
    }

    /// Where a sub-extension lives inside the repository.
    pub fn packages_url(&self, extension: &str) -> String {
        let branch_or_head = match &self.branch {
            Some(branch) => format!("tree/{branch}"),
            None => "blob/HEAD".to_string(),
        };
        format!("{}/{branch_or_head}/extension/packages/{extension}", self.repository_url())
    }
}

impl FromStr for ExtensionIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for ExtensionIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.project)?;
        if let Some(branch) = &self.branch {
            write!(f, ":{branch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthand_without_branch() {
        let id = ExtensionIdentifier::parse("owner/repo").unwrap();
        assert_eq!(id.owner, "owner");
        assert_eq!(id.project, "repo");
        assert_eq!(id.branch, None);
        assert_eq!(id.branch_url(), "https://github.com/owner/repo");
    }

    #[test]
    fn parses_shorthand_with_branch() {
        let id = ExtensionIdentifier::parse("owner/repo:dev").unwrap();
        assert_eq!(id.branch.as_deref(), Some("dev"));
        assert_eq!(id.repository_url(), "https://github.com/owner/repo");
        assert_eq!(id.branch_url(), "https://github.com/owner/repo/tree/dev");
        assert_eq!(id.to_string(), "owner/repo:dev");
    }

    #[test]
    fn empty_branch_means_no_branch() {
        let id = ExtensionIdentifier::parse("owner/repo:").unwrap();
        assert_eq!(id.project, "repo");
        assert_eq!(id.branch, None);
        assert_eq!(id.branch_url(), "https://github.com/owner/repo");
    }

    #[test]
    fn branch_stops_at_the_next_colon() {
        let id = ExtensionIdentifier::parse("o/r:a:b").unwrap();
        assert_eq!(id.project, "r");
        assert_eq!(id.branch.as_deref(), Some("a"));
    }

    #[test]
    fn parses_repository_url_positionally() {
        let id = ExtensionIdentifier::parse("https://github.com/o/r/tree/b").unwrap();
        assert_eq!(
            id,
            ExtensionIdentifier {
                base_url: "https://github.com/".into(),
                owner: "o".into(),
                project: "r".into(),
                branch: Some("b".into()),
            }
        );
    }

    #[test]
    fn url_without_tree_has_no_branch() {
        let id = ExtensionIdentifier::parse("https://github.com/o/r").unwrap();
        assert_eq!(id.branch, None);
        assert_eq!(id.packages_url("erc20"), "https://github.com/o/r/blob/HEAD/extension/packages/erc20");
    }

    #[test]
    fn packages_url_uses_branch_tree() {
        let id = ExtensionIdentifier::parse("o/r:b").unwrap();
        assert_eq!(id.packages_url("erc721"), "https://github.com/o/r/tree/b/extension/packages/erc721");
    }

    #[test]
    fn rejects_invalid_identifiers() {
        for raw in ["not-a-valid-id", "a/b/c", "https://github.com/only-owner", ""] {
            assert!(
                matches!(ExtensionIdentifier::parse(raw), Err(Error::InvalidExtensionFormat)),
                "{raw} should be rejected"
            );
        }
    }
}
