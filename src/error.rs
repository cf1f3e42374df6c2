use crate::constants::exit_codes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to parse TOML. Original error: {0}")]
    TOMLParseError(#[from] toml::de::Error),

    #[error("Failed to parse ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to walk the template directory. Original error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Failed to read user input. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Failed to replace '{path}'. Original error: {e}")]
    PersistError { path: String, e: String },

    #[error("Configuration validation failed: {0}.")]
    ConfigValidation(String),

    #[error("Cannot proceed: manifest '{path}' does not exist.")]
    ManifestNotFound { path: String },

    #[error("Unsupported data file '{path}'. Expected one of: {formats}.")]
    UnsupportedFormat { path: String, formats: String },

    #[error("Invalid variable assignment '{0}'. Expected KEY=VALUE.")]
    InvalidAssignment(String),

    #[error("Cannot proceed: template '{path}' does not exist.")]
    TemplateNotFound { path: String },

    /// The template would be rendered onto itself.
    #[error("Cannot render '{path}' in place without the '{suffix}' suffix. Pass an output.")]
    MissingOutput { path: String, suffix: String },

    #[error("Several templates cannot share the output file '{path}'. Use a directory.")]
    AmbiguousOutput { path: String },

    #[error("No templates to render. Pass template paths or declare them in a manifest.")]
    NoTemplates,

    #[error("Context validation failed: {0}")]
    ContextValidation(String),

    /// Raised by `--check` when rendering would change files on disk.
    #[error("{count} rendered file(s) are out of date: {files}")]
    OutOfDate { count: usize, files: String },

    #[error("Cannot process the source path: '{source_path}'. Original error: {e}")]
    ProcessError { source_path: String, e: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the crate error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(exit_codes::FAILURE);
}
