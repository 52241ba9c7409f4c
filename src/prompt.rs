//! User input and interaction handling.
//! Asks for whatever the command line left out: the template, the scaffold
//! name and the template's declared variables.

use crate::error::{Error, Result};
use crate::settings::{locate_template, Settings};
use crate::variables::{display_value, is_truthy, Variables};
use dialoguer::{Confirm, FuzzySelect, Input};
use serde_json::Value;

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Picks one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Reads a line of text; an empty answer is allowed.
    fn input(&self, prompt: &str, default: Option<String>) -> Result<String>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompter built on dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        FuzzySelect::new()
            .with_prompt(prompt)
            .default(default)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn input(&self, prompt: &str, default: Option<String>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default);
        }
        input.interact_text().map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Everything a generation request needs from the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Answers {
    pub template: String,
    pub name: String,
    pub variables: Variables,
}

/// Builds answers from the command line alone, without prompting.
///
/// # Errors
/// * `Error::ConfigError` when the template or the name is missing
pub fn require_answers(
    template: Option<String>,
    name: Option<String>,
    variables: Variables,
) -> Result<Answers> {
    let template = template
        .ok_or_else(|| Error::ConfigError("No template type given".to_string()))?;
    let name = name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| Error::ConfigError("No name given".to_string()))?;
    Ok(Answers {
        template,
        name,
        variables,
    })
}

/// Prompts for the template, the name and every declared variable the user
/// has not supplied yet.
///
/// Supplied values are never asked for again. Answers to declared variables
/// are raw values and are coerced later like any other user variable.
pub fn ask_missing(
    prompter: &dyn Prompter,
    settings: &Settings,
    template: Option<String>,
    name: Option<String>,
    mut variables: Variables,
) -> Result<Answers> {
    let template = match template {
        Some(template) => template,
        None => {
            let ids: Vec<String> = settings.templates.keys().cloned().collect();
            if ids.is_empty() {
                return Err(Error::ConfigError(format!(
                    "No templates found (template path: '{}')",
                    settings.template_path
                )));
            }
            let index = prompter.select("Template type", &ids, 0)?;
            ids[index].clone()
        }
    };

    let name = match name {
        Some(name) => name,
        None => prompter.input("Name", None)?,
    };
    if name.trim().is_empty() {
        return Err(Error::ConfigError("No name given".to_string()));
    }

    let found = locate_template(settings, &template)?;
    for declaration in &found.variables {
        if variables.contains_key(&declaration.name) {
            continue;
        }
        let prompt = declaration.message.as_deref().unwrap_or(&declaration.name);
        let answer = match declaration.display_type.as_str() {
            "confirm" => {
                let default = declaration.default.as_ref().is_some_and(is_truthy);
                Value::Bool(prompter.confirm(prompt, default)?)
            }
            _ => {
                let default = declaration.default.as_ref().map(display_value);
                Value::String(prompter.input(prompt, default)?)
            }
        };
        variables.insert(declaration.name.clone(), answer);
    }

    Ok(Answers {
        template,
        name,
        variables,
    })
}
