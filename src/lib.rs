//! senggen is a scaffolding generator.
//! It renders a named template directory into a destination, substituting
//! variables in file paths and file contents.

/// Text/binary classification of template files
pub mod binary;

/// Word splitting and case conversion
pub mod case;

/// Command-line interface module for the senggen application
pub mod cli;

/// Common constants
pub mod constants;

/// Error types and handling for the senggen application
pub mod error;

/// Generation of a scaffold from a template
pub mod generate;

/// Logging backend setup for the binary
pub mod logger;

/// Pipeline stages: hidden-file filter, path and content rendering,
/// collision checking
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering engine for file contents
pub mod renderer;

/// Global, local and per-template settings
pub mod settings;

/// In-memory file tree loading and writing
pub mod tree;

/// Variable resolution: defaults, coercion and name variants
pub mod variables;
