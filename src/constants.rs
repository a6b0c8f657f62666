//! Constants used throughout create-stylus

/// Subdirectory of the templates directory holding the always-copied skeleton
pub const BASE_DIR: &str = "base";

/// Subdirectory of the templates directory holding built-in extensions
pub const EXTENSIONS_DIR: &str = "extensions";

/// Sibling of the templates directory holding dev-mode external extensions
pub const EXTERNAL_EXTENSIONS_DIR: &str = "externalExtensions";

/// Root of an external extension inside its repository
pub const EXTERNAL_EXTENSION_ROOT: &str = "extension";

/// Prefix of the scratch directory an external extension is cloned into
pub const EXTERNAL_EXTENSION_TMP_DIR: &str = "tmp-external-extension";

/// Per-package subtree of a template root
pub const PACKAGES_DIR: &str = "packages";

/// Marker segment of an args file name
pub const ARGS_MARKER: &str = ".args.";

/// Suffix of dev-mode diagnostic sidecar files
pub const DEV_SIDECAR_SUFFIX: &str = ".dev";

pub const MANIFEST_FILE: &str = "package.json";
pub const GITMODULES_FILE: &str = ".gitmodules";
pub const ROOT_README_FILE: &str = "readme.md";
pub const PACKAGE_README_FILE: &str = "README.md";

/// Source stubs an extension package replaces wholesale
pub const SOURCE_STUB_FILES: &[&str] = &["lib.rs", "main.rs"];

/// Build descriptors an extension package replaces wholesale
pub const BUILD_DESCRIPTOR_FILES: &[&str] = &["Cargo.toml", "Cargo.lock"];

/// File names that are never copied into a generated project
pub const PLATFORM_METADATA_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Branch created when the generated project's repository is initialised
pub const PRIMARY_BRANCH: &str = "main";

pub const FIRST_COMMIT_MESSAGE: &str = "Initial commit with 🏗️ Scaffold-Stylus";

/// Default project name when none is supplied non-interactively
pub const DEFAULT_PROJECT_NAME: &str = "my-dapp-example";

/// Environment variable overriding the templates directory
pub const TEMPLATES_DIR_ENV: &str = "CREATE_STYLUS_TEMPLATES_DIR";

/// Remote extension settings
pub mod remote {
    pub const GITHUB_BASE_URL: &str = "https://github.com/";

    /// Owners whose extensions are considered trusted
    pub const TRUSTED_ORGANIZATIONS: &[&str] = &["scaffold-eth", "buidlguidl"];
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const DEFAULT: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
