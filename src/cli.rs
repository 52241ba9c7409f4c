//! Command-line interface implementation for senggen.
//! Provides argument parsing and help text formatting using clap.

use crate::error::{Error, Result};
use crate::variables::Variables;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// Command-line arguments structure for senggen.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "senggen: scaffolding generator for components, modules and services",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate files from a template
    New(NewArgs),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// List the available templates
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Template type, the name of a directory in a template path
    #[arg(value_name = "TYPE")]
    pub template: Option<String>,

    /// Name of the generated scaffold
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Template variables as `key=value` or `--key=value`.
    /// Options must come before the first variable.
    #[arg(value_name = "VARIABLES", trailing_var_arg = true, allow_hyphen_values = true)]
    pub variables: Vec<String>,

    /// Directory the files are generated into
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Overwrite files that already exist in the destination
    #[arg(short, long)]
    pub force: bool,

    /// Comma-separated template paths, replacing the configured ones
    #[arg(long, value_name = "PATHS")]
    pub template_path: Option<String>,

    /// Never prompt; fail when the type or name is missing
    #[arg(long)]
    pub no_input: bool,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the settings in effect
    Show,

    /// Change settings; KEY is templatePath or destination
    Set {
        #[arg(value_name = "KEY=VALUE", required = true)]
        values: Vec<String>,

        /// Write the user's global settings instead of the local ones
        #[arg(short, long)]
        global: bool,
    },

    /// Remove all global settings
    Reset,
}

/// Options of `new` that clap reads as variables once they follow one.
const NEW_OPTIONS: [&str; 10] = [
    "force",
    "destination",
    "template-path",
    "no-input",
    "verbose",
    "help",
    "f",
    "d",
    "v",
    "h",
];

/// Parses a single `key=value`, `--key=value` or `--flag` argument.
///
/// A bare flag is the string `"true"`.
///
/// # Errors
/// * `Error::ConfigError` if the key is empty, or if a dashed argument names
///   an option of `new`
pub fn parse_variable(raw: &str) -> Result<(String, Value)> {
    let stripped = raw.trim_start_matches('-');
    let (key, value) = stripped.split_once('=').unwrap_or((stripped, "true"));
    if key.is_empty() {
        return Err(Error::ConfigError(format!("Invalid variable '{raw}'")));
    }
    if raw.starts_with('-') && NEW_OPTIONS.contains(&key) {
        return Err(Error::ConfigError(format!(
            "Option '{raw}' must come before the template variables"
        )));
    }
    Ok((key.to_string(), Value::String(value.to_string())))
}

/// Parses all variable arguments; later occurrences of a key win.
pub fn parse_variables(raw: &[String]) -> Result<Variables> {
    raw.iter().map(|arg| parse_variable(arg)).collect()
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if a required argument or the subcommand is missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
