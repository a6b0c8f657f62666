/// Path-based classification of template tree entries.
pub mod classify;

/// Handles argument parsing and the interactive workflow.
pub mod cli;

/// Layers the base tree, extensions and templates into a new project.
pub mod compose;

/// Locations of the templates and dev-mode extensions.
pub mod config;

pub mod constants;

/// Non-destructive tree copying and hard-linking.
pub mod copy;

/// Defines custom error types.
pub mod error;

pub mod ext;

/// Resolution of third-party and local external extensions.
pub mod external;

/// Version-control operations.
pub mod git;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Sources an extension tree can be loaded from.
pub mod loader;

/// Manifest, `.gitmodules` and README merging.
pub mod merge;

pub mod options;

/// User input and interaction handling.
pub mod prompt;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Templated-file discovery, args and rendering.
pub mod template;

/// Project name validation.
pub mod validation;
