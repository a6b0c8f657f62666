//! Path-based classification of the files met while composing a project.
//!
//! Classification only looks at the path (relative to the root being walked)
//! and, for the two directory roles, whether the entry is a directory. File
//! contents are never inspected here.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::constants::ARGS_MARKER;

static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/\\]*?)\.template\.").unwrap());
static MANIFEST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"package\.json").unwrap());
static LOCKFILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"yarn\.lock").unwrap());
static CONFIG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[/\\])config\.json$").unwrap());
static ARGS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^/\\]*?)\.args\.").unwrap());
static EXTENSIONS_DIR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"extensions$").unwrap());
static PACKAGES_DIR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"packages$").unwrap());
static GITMODULES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.gitmodules$").unwrap());
static README_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)readme\.md$").unwrap());

/// The role a path plays during composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Rendered from a template, never copied literally.
    Template,
    Manifest,
    Lockfile,
    /// Extension-local `config.json`, never copied.
    ExtensionConfig,
    /// Contributes arguments to a template.
    Args,
    ExtensionsDir,
    PackagesDir,
    Gitmodules,
    Readme,
    Other,
}

impl FileRole {
    /// Roles in the order `classify` tests them.
    pub const ORDERED: [FileRole; 9] = [
        FileRole::Template,
        FileRole::Manifest,
        FileRole::Lockfile,
        FileRole::ExtensionConfig,
        FileRole::Args,
        FileRole::ExtensionsDir,
        FileRole::PackagesDir,
        FileRole::Gitmodules,
        FileRole::Readme,
    ];

    /// Whether `path` matches this role's pattern.
    ///
    /// Patterns are unanchored unless noted, so `package.json` matches any path
    /// containing that text and `extensions`/`packages` match any directory whose
    /// path ends with it.
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        match self {
            FileRole::Template => TEMPLATE_RE.is_match(path),
            FileRole::Manifest => MANIFEST_RE.is_match(path),
            FileRole::Lockfile => LOCKFILE_RE.is_match(path),
            FileRole::ExtensionConfig => CONFIG_RE.is_match(path),
            FileRole::Args => ARGS_RE.is_match(path),
            FileRole::ExtensionsDir => is_dir && EXTENSIONS_DIR_RE.is_match(path),
            FileRole::PackagesDir => is_dir && PACKAGES_DIR_RE.is_match(path),
            FileRole::Gitmodules => GITMODULES_RE.is_match(path),
            FileRole::Readme => README_RE.is_match(path),
            FileRole::Other => !FileRole::ORDERED.iter().any(|role| role.matches(path, is_dir)),
        }
    }

    /// Whether `path` matches any of `roles`.
    pub fn any(roles: &[FileRole], path: &str, is_dir: bool) -> bool {
        roles.iter().any(|role| role.matches(path, is_dir))
    }
}

/// Returns the first role in [`FileRole::ORDERED`] that `path` matches.
pub fn classify(path: &str, is_dir: bool) -> FileRole {
    FileRole::ORDERED
        .into_iter()
        .find(|role| role.matches(path, is_dir))
        .unwrap_or(FileRole::Other)
}

/// Name of the file a template renders to, e.g. `foo.template.ts` -> `foo.ts`.
///
/// Only the first marker segment is stripped. Returns `None` for paths that are
/// not templates.
pub fn template_output_path(relative: &str) -> Option<String> {
    TEMPLATE_RE
        .captures(relative)
        .map(|caps| {
            let replacement = format!("{}.", &caps[1]);
            TEMPLATE_RE.replacen(relative, 1, NoExpand(&replacement)).into_owned()
        })
}

/// The logical name of a template: its output file name without directories.
pub fn template_target_name(relative: &str) -> Option<String> {
    let output = template_output_path(relative)?;
    output.rsplit(['/', '\\']).next().map(str::to_string)
}

/// Path of the args file paired with a template, e.g. `foo.template.ts` -> `foo.args.ts`.
pub fn args_path_for(relative: &str) -> Option<String> {
    TEMPLATE_RE.captures(relative).map(|caps| {
        let replacement = format!("{}{}", &caps[1], ARGS_MARKER);
        TEMPLATE_RE.replacen(relative, 1, NoExpand(&replacement)).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_template_marker() {
        assert_eq!(classify("packages/nextjs/foo.template.ts", false), FileRole::Template);
        assert_eq!(classify("templatefoo.ts", false), FileRole::Other);
    }

    #[test]
    fn classifies_manifest_unanchored() {
        assert_eq!(classify("package.json", false), FileRole::Manifest);
        assert_eq!(classify("packages/nextjs/package.json", false), FileRole::Manifest);
        assert_eq!(classify("package.json.bak", false), FileRole::Manifest);
    }

    #[test]
    fn classifies_lockfile() {
        assert_eq!(classify("yarn.lock", false), FileRole::Lockfile);
        assert_eq!(classify("packages/stylus/Cargo.lock", false), FileRole::Other);
    }

    #[test]
    fn classifies_extension_config_by_file_name() {
        assert_eq!(classify("config.json", false), FileRole::ExtensionConfig);
        assert_eq!(classify("nested/config.json", false), FileRole::ExtensionConfig);
        assert_eq!(classify("tsconfig.json", false), FileRole::Other);
    }

    #[test]
    fn classifies_args_marker() {
        assert_eq!(classify("foo.args.ts", false), FileRole::Args);
        assert_eq!(classify("packages/nextjs/foo.args.yaml", false), FileRole::Args);
    }

    #[test]
    fn classifies_extensions_dir_only_for_directories() {
        assert_eq!(classify("extensions", true), FileRole::ExtensionsDir);
        assert_eq!(classify("extensions", false), FileRole::Other);
    }

    #[test]
    fn classifies_packages_dir_only_for_directories() {
        assert_eq!(classify("packages", true), FileRole::PackagesDir);
        assert_eq!(classify("packages/nextjs", true), FileRole::Other);
        assert_eq!(classify("packages", false), FileRole::Other);
    }

    #[test]
    fn classifies_gitmodules_anchored_at_end() {
        assert_eq!(classify(".gitmodules", false), FileRole::Gitmodules);
        assert_eq!(classify("packages/stylus/.gitmodules", false), FileRole::Gitmodules);
        assert_eq!(classify(".gitmodules.bak", false), FileRole::Other);
    }

    #[test]
    fn classifies_readme_case_insensitively() {
        assert_eq!(classify("readme.md", false), FileRole::Readme);
        assert_eq!(classify("packages/stylus/README.md", false), FileRole::Readme);
        assert_eq!(classify("README.mdx", false), FileRole::Other);
    }

    #[test]
    fn template_wins_over_later_roles() {
        assert_eq!(classify("package.json.template.ts", false), FileRole::Template);
        assert!(FileRole::Manifest.matches("package.json.template.ts", false));
    }

    #[test]
    fn strips_marker_segment_for_output() {
        assert_eq!(template_output_path("foo.template.ts").as_deref(), Some("foo.ts"));
        assert_eq!(
            template_output_path("packages/nextjs/scaffold.config.template.ts").as_deref(),
            Some("packages/nextjs/scaffold.config.ts")
        );
        assert_eq!(template_output_path("plain.ts"), None);
        assert_eq!(
            template_target_name("packages/nextjs/scaffold.config.template.ts").as_deref(),
            Some("scaffold.config.ts")
        );
    }

    #[test]
    fn derives_args_sibling() {
        assert_eq!(
            args_path_for("packages/nextjs/foo.template.ts").as_deref(),
            Some("packages/nextjs/foo.args.ts")
        );
    }
}
