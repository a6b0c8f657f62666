//! Project name validation following npm package-name rules.

use std::sync::LazyLock;

use regex::Regex;

const MAX_NAME_LENGTH: usize = 214;

static URL_SAFE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9*~-][a-z0-9*._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$").unwrap()
});

/// Outcome of validating a project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameValidation {
    pub problems: Vec<String>,
}

impl NameValidation {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Checks `name` against the npm package-name rules.
///
/// Every violated rule contributes one problem; problems read as the tail of
/// a sentence starting with "Project", e.g. "name cannot be empty".
pub fn validate_project_name(name: &str) -> NameValidation {
    let mut problems = Vec::new();

    if name.trim().is_empty() {
        problems.push("name cannot be empty".to_string());
        return NameValidation { problems };
    }
    if name.len() > MAX_NAME_LENGTH {
        problems.push(format!("name cannot be longer than {MAX_NAME_LENGTH} characters"));
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }
    if name.to_lowercase() != name {
        problems.push("name can no longer contain capital letters".to_string());
    }
    if !URL_SAFE_RE.is_match(&name.to_lowercase()) {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    NameValidation { problems }
}
