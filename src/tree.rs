//! In-memory file tree used by the generation pipeline.
//! A template directory is loaded into a [`FileTree`], transformed in memory
//! and written to the destination only once every stage has succeeded.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single file of the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub contents: Vec<u8>,
    /// Unix permission bits of the source file, if any
    pub mode: Option<u32>,
}

impl FileEntry {
    pub fn new<C: Into<Vec<u8>>>(contents: C) -> Self {
        Self {
            contents: contents.into(),
            mode: None,
        }
    }
}

/// Files keyed by their `/`-separated path relative to the tree root.
pub type FileTree = IndexMap<String, FileEntry>;

/// Converts a relative path to the tree's `/`-separated key form.
fn tree_key(relative: &Path) -> Result<String> {
    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str().to_str().map(str::to_string).ok_or_else(|| {
                Error::ConfigError(format!("Invalid path: {}", relative.display()))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn file_mode(metadata: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn file_mode(_metadata: &fs::Metadata) -> Option<u32> {
    None
}

/// Reads every file below `root` into a tree.
///
/// Entries are visited in file-name order, so the same directory always
/// produces the same tree. Directories only appear through the files they
/// contain.
pub fn load_tree<P: AsRef<Path>>(root: P) -> Result<FileTree> {
    let root = root.as_ref();
    let mut tree = FileTree::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let key = tree_key(relative)?;
        let contents = fs::read(entry.path())?;
        let mode = file_mode(&entry.metadata()?);

        debug!("Loaded template file: {}", key);
        tree.insert(key, FileEntry { contents, mode });
    }

    Ok(tree)
}

/// Writes every entry of `tree` below `destination`.
///
/// Parent directories are created as needed and existing files are
/// overwritten. Files already in the destination that the tree does not
/// mention are left alone.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Written paths, in tree order
pub fn write_tree<P: AsRef<Path>>(tree: &FileTree, destination: P) -> Result<Vec<PathBuf>> {
    let destination = destination.as_ref();
    let mut written = Vec::with_capacity(tree.len());

    for (key, entry) in tree {
        let target = destination.join(key);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &entry.contents)?;
        set_mode(&target, entry.mode)?;

        debug!("Wrote file: {}", target.display());
        written.push(target);
    }

    Ok(written)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
