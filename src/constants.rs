//! Common constants used throughout senggen.

/// Settings file name, used both for global/local settings and for a
/// template's variable declarations.
pub const SETTINGS_FILE: &str = ".senggenerator";

/// Destination used when neither settings nor the command line name one
pub const DEFAULT_DESTINATION: &str = ".";

/// Prompt type given to variable declarations that do not name one
pub const DEFAULT_VARIABLE_TYPE: &str = "input";

/// Separator between entries of the template search path setting
pub const SEARCH_PATH_SEPARATOR: char = ',';
