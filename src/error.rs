use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk directory. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Git operation failed. Original error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("HTTP request failed. Original error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Prompt failed. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Cannot proceed: output directory '{output_dir}' already exists.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// The template file is blank and no render function is registered for it.
    #[error("Template {template} from {source_label} doesn't have a default export")]
    TemplateWithoutRenderer { template: String, source_label: String },

    #[error("Template {template} from {source_label} is not exporting a function by default: {reason}")]
    TemplateNotRenderable { template: String, source_label: String, reason: String },

    #[error("Failed to parse args file '{path}': {e}")]
    ArgsParseError { path: String, e: String },

    #[error("Failed to parse manifest '{path}'. Original error: {e}")]
    ManifestParseError { path: String, e: serde_json::Error },

    #[error("Invalid extension format. Use \"owner/project\", \"owner/project:branch\" or github url.")]
    InvalidExtensionFormat,

    #[error("Extension not found: {url}")]
    ExtensionNotFound { url: String },

    #[error("Extension not found in \"externalExtensions/{name}\"")]
    LocalExtensionNotFound { name: String },

    #[error("{extension} extension check failed with status {status}. You can verify it at {url}.")]
    SubExtensionCheckFailed { extension: String, status: u16, url: String },

    #[error("Invalid curated extension entry: {0}")]
    RegistryError(String),

    /// When an external command (install, format) ran but finished with an error.
    #[error("Command '{command}' failed with status: {status}")]
    CommandExecutionError { command: String, status: ExitStatus },

    /// Represents validation failures in user input
    #[error("Validation error: {0}.")]
    ValidationError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the crate's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
