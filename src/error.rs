//! Error handling for senggen.
//! Defines the crate-wide error type and result alias.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for senggen operations.
///
/// Variable problems are deliberately absent: undeclared or default-less
/// variables are logged as warnings and never become errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors while walking a template directory
    #[error("Failed to read template directory: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Represents malformed settings files
    #[error("Settings error: {0}.")]
    SettingsError(#[from] serde_json::Error),

    /// Represents errors that occur during configuration processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// No search path contains a directory with the requested template name
    #[error("Template '{template}' was not found in any template path (searched: {searched}).")]
    TemplateNotFoundError { template: String, searched: String },

    /// The template search path setting is empty
    #[error("No template path is configured. Set templatePath or pass --template-path.")]
    EmptySearchPathError,

    /// Represents a failure while rendering a single file's contents
    #[error("Failed to render '{path}': {source}.")]
    RenderError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// A rendered path climbs out of the destination with `..`
    #[error("Path '{source_path}' renders to '{path}', which is outside the destination.")]
    PathEscapeError { source_path: String, path: String },

    /// Represents a generated file that already exists in the destination
    #[error(
        "File '{}' already exists ({count} colliding file(s)). Use --force to overwrite.",
        path.display()
    )]
    CollisionError { path: PathBuf, count: usize },

    /// Represents failures of the interactive prompt
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with senggen's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
