//! Generation of a scaffold from a template.
//! Ties variable resolution and the processor stages together and writes the
//! result only once every stage has succeeded.

use crate::error::Result;
use crate::processor::{check_exists, filter_hidden, render_contents, render_paths};
use crate::renderer::TemplateRenderer;
use crate::settings::{locate_template, Settings};
use crate::tree::{load_tree, write_tree};
use crate::variables::{resolve, Variables};
use log::{debug, info};
use std::path::PathBuf;

/// Options of a single generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Scaffold name the `name*` variables are derived from
    pub name: String,
    pub destination: PathBuf,
    /// Raw variables as supplied by the user, before coercion
    pub variables: Variables,
    /// Overwrite files that already exist in the destination
    pub force: bool,
}

/// Generates a scaffold from `template` into `options.destination`.
///
/// Nothing is written unless the template is found, every file renders and,
/// without `force`, none of the generated files already exists.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Paths of the written files
///
/// # Errors
/// * `Error::EmptySearchPathError` / `Error::TemplateNotFoundError` when the
///   template cannot be located
/// * `Error::PathEscapeError` when a rendered path leaves the destination
/// * `Error::RenderError` when any file fails to render
/// * `Error::CollisionError` when a generated file already exists
pub fn generate(
    template: &str,
    options: &GenerateOptions,
    settings: &Settings,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>> {
    let found = locate_template(settings, template)?;
    info!(
        "Generating files from '{}' template ({}) with name: {}",
        template,
        found.path.display(),
        options.name
    );

    let variables = resolve(template, &options.variables, &found.variables, &options.name);

    let tree = load_tree(&found.path)?;
    debug!("Loaded {} file(s) from {}", tree.len(), found.path.display());

    let tree = filter_hidden(tree);
    let tree = render_paths(tree, &variables)?;
    let tree = render_contents(tree, &variables, renderer)?;

    check_exists(&tree, &options.destination, options.force)?;
    write_tree(&tree, &options.destination)
}
