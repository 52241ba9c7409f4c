//! Pipeline stages applied to a loaded template tree.
//! Hidden files are filtered out, paths and contents are rendered, and the
//! result is checked against the destination before anything is written.

use crate::binary::is_binary;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::tree::{FileEntry, FileTree};
use crate::variables::{display_value, Variables};
use log::{debug, warn};
use rayon::prelude::*;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `${name}` or `{name}`, with optional dotted access and an ignored `(args)` suffix.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\{([@#$%&.\w]*)(\((.*?)\))?\}").expect("valid placeholder regex")
});

/// Whether any segment of a tree path starts with a dot.
pub fn is_hidden(path: &str) -> bool {
    path.split('/').any(|segment| segment.starts_with('.'))
}

/// Removes dotfiles and everything below dot-directories.
pub fn filter_hidden(tree: FileTree) -> FileTree {
    tree.into_iter()
        .filter(|(path, _)| {
            let hidden = is_hidden(path);
            if hidden {
                debug!("Skipping hidden file: {}", path);
            }
            !hidden
        })
        .collect()
}

/// Replaces every placeholder in `value` with the matching variable.
///
/// Only the first segment of a dotted name is looked up; the rest is
/// ignored, so `{name.length}` renders the same as `{name}`. Unknown
/// names render as the empty string.
pub fn replace_placeholders(value: &str, variables: Option<&Variables>) -> String {
    PLACEHOLDER
        .replace_all(value, |caps: &Captures| {
            let key = caps[1].split('.').next().unwrap_or_default();
            variables
                .and_then(|vars| vars.get(key))
                .map(display_value)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Drops empty and `.` segments left behind by placeholders that rendered
/// to nothing. Returns `None` when no segment is left.
pub fn normalize_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Renders the placeholders of every path in the tree.
///
/// A renamed entry keeps its position in the tree. Entries whose path
/// renders to nothing are dropped. When two entries render to the same path
/// the later one wins.
///
/// # Errors
/// * `Error::PathEscapeError` if a rendered path has a `..` segment
pub fn render_paths(tree: FileTree, variables: &Variables) -> Result<FileTree> {
    let mut rendered = FileTree::with_capacity(tree.len());
    for (path, entry) in tree {
        let replaced = replace_placeholders(&path, Some(variables));
        let Some(target) = normalize_path(&replaced) else {
            debug!("Skipping '{}' as its rendered path is empty", path);
            continue;
        };
        if target.split('/').any(|segment| segment == "..") {
            return Err(Error::PathEscapeError {
                source_path: path,
                path: target,
            });
        }
        if target != path {
            debug!("Renamed '{}' to '{}'", path, target);
        }
        if rendered.contains_key(&target) {
            warn!("'{}' renders to '{}', replacing an earlier file with that path", path, target);
        }
        rendered.insert(target, entry);
    }
    Ok(rendered)
}

fn render_entry(
    path: String,
    entry: FileEntry,
    context: &serde_json::Value,
    renderer: &dyn TemplateRenderer,
) -> Result<(String, FileEntry)> {
    if is_binary(&path, &entry.contents) {
        debug!("Copying binary file as is: {}", path);
        return Ok((path, entry));
    }
    let text = match String::from_utf8(entry.contents) {
        Ok(text) => text,
        Err(e) => {
            debug!("Copying non UTF-8 file as is: {}", path);
            let entry = FileEntry {
                contents: e.into_bytes(),
                mode: entry.mode,
            };
            return Ok((path, entry));
        }
    };
    let rendered = renderer.render(&path, &text, context)?;
    let entry = FileEntry {
        contents: rendered.into_bytes(),
        mode: entry.mode,
    };
    Ok((path, entry))
}

/// Renders the contents of every text file in parallel.
///
/// The first failing file fails the whole batch and the rendered siblings
/// are discarded. The resulting tree keeps the input order.
pub fn render_contents(
    tree: FileTree,
    variables: &Variables,
    renderer: &dyn TemplateRenderer,
) -> Result<FileTree> {
    let context = serde_json::Value::Object(variables.clone());
    let entries: Vec<(String, FileEntry)> = tree.into_iter().collect();

    let rendered = entries
        .into_par_iter()
        .map(|(path, entry)| render_entry(path, entry, &context, renderer))
        .collect::<Result<Vec<_>>>()?;

    Ok(rendered.into_iter().collect())
}

/// Fails if any file of the tree already exists below `destination`.
///
/// # Errors
/// * `Error::CollisionError` naming the first colliding path in tree order
///   unless `force` is set
pub fn check_exists<P: AsRef<Path>>(tree: &FileTree, destination: P, force: bool) -> Result<()> {
    if force {
        return Ok(());
    }
    let destination = destination.as_ref();
    let collisions: Vec<PathBuf> = tree
        .keys()
        .map(|path| destination.join(path))
        .filter(|target| target.exists())
        .collect();

    match collisions.first() {
        Some(path) => Err(Error::CollisionError {
            path: path.clone(),
            count: collisions.len(),
        }),
        None => Ok(()),
    }
}
