//! Settings handling for senggen.
//! Settings are layered from built-in defaults, the user's global settings
//! file, the `.senggenerator` file of the working directory and command-line
//! overrides. Every directory found in a template search path is a template,
//! and its own `.senggenerator` file declares the template's variables.

use crate::constants::{DEFAULT_DESTINATION, SEARCH_PATH_SEPARATOR, SETTINGS_FILE};
use crate::error::{Error, Result};
use crate::variables::VariableDeclaration;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of a single `.senggenerator` file. Every field is optional so
/// files can be layered on top of each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsFile {
    /// Comma-separated template search paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Variables declared by a template directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableDeclaration>,
}

impl SettingsFile {
    /// Layers `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: SettingsFile) -> SettingsFile {
        SettingsFile {
            template_path: other.template_path.or(self.template_path),
            destination: other.destination.or(self.destination),
            variables: if other.variables.is_empty() {
                self.variables
            } else {
                other.variables
            },
        }
    }

    /// Sets a single setting from its command-line `key` and `value`.
    ///
    /// # Errors
    /// * `Error::ConfigError` for keys other than `templatePath` and `destination`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "templatePath" => self.template_path = Some(value.to_string()),
            "destination" => self.destination = Some(value.to_string()),
            _ => {
                return Err(Error::ConfigError(format!(
                    "Unknown setting '{key}' (expected templatePath or destination)"
                )))
            }
        }
        Ok(())
    }
}

/// Settings of a single template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateSettings {
    /// Directory holding the template files
    pub path: PathBuf,
    pub variables: Vec<VariableDeclaration>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub template_path: String,
    pub destination: String,
    /// Templates keyed by identifier, in search path order
    pub templates: IndexMap<String, TemplateSettings>,
}

impl Settings {
    /// The template search paths, in priority order.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        split_search_paths(&self.template_path)
    }
}

/// Splits a comma-separated search path setting, dropping empty entries.
pub fn split_search_paths(template_path: &str) -> Vec<PathBuf> {
    template_path
        .split(SEARCH_PATH_SEPARATOR)
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Storage for global and local settings files.
pub trait SettingsStore {
    /// Loads the user's global settings; missing settings are empty.
    fn load_global(&self) -> Result<SettingsFile>;

    fn save_global(&self, settings: &SettingsFile) -> Result<()>;

    /// Loads the settings of the working directory; missing settings are empty.
    fn load_local(&self) -> Result<SettingsFile>;

    fn save_local(&self, settings: &SettingsFile) -> Result<()>;
}

/// Settings store backed by `.senggenerator` JSON files.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    global_file: Option<PathBuf>,
    local_dir: PathBuf,
}

impl FileSettingsStore {
    pub fn new<P: Into<PathBuf>>(global_file: Option<PathBuf>, local_dir: P) -> Self {
        Self {
            global_file,
            local_dir: local_dir.into(),
        }
    }

    /// Store using `$HOME/.senggenerator` and the current directory.
    pub fn from_env() -> Self {
        Self::new(dirs::home_dir().map(|home| home.join(SETTINGS_FILE)), ".")
    }

    fn local_file(&self) -> PathBuf {
        self.local_dir.join(SETTINGS_FILE)
    }

    fn global_file(&self) -> Result<&Path> {
        self.global_file
            .as_deref()
            .ok_or_else(|| Error::ConfigError("Unable to locate the home directory".to_string()))
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_global(&self) -> Result<SettingsFile> {
        match &self.global_file {
            Some(path) => read_settings_file(path),
            None => Ok(SettingsFile::default()),
        }
    }

    fn save_global(&self, settings: &SettingsFile) -> Result<()> {
        write_settings_file(self.global_file()?, settings)
    }

    fn load_local(&self) -> Result<SettingsFile> {
        read_settings_file(self.local_file())
    }

    fn save_local(&self, settings: &SettingsFile) -> Result<()> {
        write_settings_file(self.local_file(), settings)
    }
}

/// Reads a settings file, returning empty settings when it does not exist.
///
/// # Errors
/// * `Error::SettingsError` if the file is not valid settings JSON
pub fn read_settings_file<P: AsRef<Path>>(path: P) -> Result<SettingsFile> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(SettingsFile::default());
    }
    debug!("Loading settings from {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_settings_file<P: AsRef<Path>>(path: P, settings: &SettingsFile) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing settings to {}", path.display());
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content + "\n")?;
    Ok(())
}

/// Resolves the settings in effect, discovering the available templates.
pub fn get_settings(store: &dyn SettingsStore, overrides: SettingsFile) -> Result<Settings> {
    let merged = SettingsFile::default()
        .merge(store.load_global()?)
        .merge(store.load_local()?)
        .merge(overrides);

    let template_path = merged.template_path.unwrap_or_default();
    let destination = merged.destination.unwrap_or_else(|| DEFAULT_DESTINATION.to_string());
    let templates = discover_templates(&split_search_paths(&template_path))?;

    Ok(Settings {
        template_path,
        destination,
        templates,
    })
}

/// Finds the templates in the given search paths.
///
/// Every non-hidden directory directly inside a search path is a template.
/// When two search paths hold a template with the same identifier, the
/// earlier path wins. Search paths that do not exist are skipped.
pub fn discover_templates(search_paths: &[PathBuf]) -> Result<IndexMap<String, TemplateSettings>> {
    let mut templates = IndexMap::new();

    for search_path in search_paths {
        if !search_path.is_dir() {
            debug!("Skipping missing template path {}", search_path.display());
            continue;
        }
        let mut dirs = fs::read_dir(search_path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        dirs.sort();

        for dir in dirs.into_iter().filter(|dir| dir.is_dir()) {
            let Some(id) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            if id.starts_with('.') || templates.contains_key(&id) {
                continue;
            }
            let variables = read_settings_file(dir.join(SETTINGS_FILE))?.variables;
            templates.insert(id, TemplateSettings {
                path: dir,
                variables,
            });
        }
    }

    Ok(templates)
}

/// Locates the template with the given identifier.
///
/// Identifiers may name nested directories (`react/component`); those are
/// looked up in every search path even though discovery only lists the
/// top level.
///
/// # Errors
/// * `Error::EmptySearchPathError` if no search path is configured
/// * `Error::TemplateNotFoundError` if no search path contains the template
pub fn locate_template(settings: &Settings, template: &str) -> Result<TemplateSettings> {
    let search_paths = settings.search_paths();
    if search_paths.is_empty() {
        return Err(Error::EmptySearchPathError);
    }
    if let Some(found) = settings.templates.get(template) {
        return Ok(found.clone());
    }

    for search_path in &search_paths {
        let dir = search_path.join(template);
        if dir.is_dir() {
            let variables = read_settings_file(dir.join(SETTINGS_FILE))?.variables;
            return Ok(TemplateSettings {
                path: dir,
                variables,
            });
        }
    }

    Err(Error::TemplateNotFoundError {
        template: template.to_string(),
        searched: search_paths
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Merges `updates` into the global settings and saves them.
pub fn set_global_settings(store: &dyn SettingsStore, updates: SettingsFile) -> Result<()> {
    let settings = store.load_global()?.merge(updates);
    store.save_global(&settings)
}

/// Merges `updates` into the local settings and saves them.
pub fn set_local_settings(store: &dyn SettingsStore, updates: SettingsFile) -> Result<()> {
    let settings = store.load_local()?.merge(updates);
    store.save_local(&settings)
}

/// Clears every global setting.
pub fn reset_settings(store: &dyn SettingsStore) -> Result<()> {
    store.save_global(&SettingsFile::default())
}

/// Formats settings as an indented key tree, one `key: 'value'` per line.
pub fn describe_settings(settings: &Settings) -> Result<String> {
    let mut out = String::new();
    describe_value(&serde_json::to_value(settings)?, 0, &mut out);
    Ok(out)
}

fn describe_value(value: &serde_json::Value, indent: usize, out: &mut String) {
    let indentation = "  ".repeat(indent);
    let entries: Vec<(String, &serde_json::Value)> = match value {
        serde_json::Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        serde_json::Value::Array(items) => {
            items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect()
        }
        _ => return,
    };
    for (key, value) in entries {
        match value {
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                out.push_str(&format!("{indentation}{key}:\n"));
                describe_value(value, indent + 1, out);
            }
            serde_json::Value::String(s) => out.push_str(&format!("{indentation}{key}: '{s}'\n")),
            other => out.push_str(&format!("{indentation}{key}: '{other}'\n")),
        }
    }
}
