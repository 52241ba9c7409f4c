//! Template renderer for file contents.
//! Wraps MiniJinja and registers the helper functions templates can call.
use crate::case;
use crate::error::{Error, Result};
use minijinja::{Environment, UndefinedBehavior, Value};

/// Trait for template rendering engines.
///
/// Implementations are shared between the rendering threads of a single
/// generation request.
pub trait TemplateRenderer: Send + Sync {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Name reported in errors, usually the file's relative path
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

type Helper = fn(String) -> String;

fn camel_case(value: String) -> String {
    case::camel_case(&value)
}

fn pascal_case(value: String) -> String {
    case::pascal_case(&value)
}

fn slug_case(value: String) -> String {
    case::slug_case(&value)
}

fn snake_case(value: String) -> String {
    case::snake_case(&value)
}

fn upper_case(value: String) -> String {
    value.to_uppercase()
}

fn lower_case(value: String) -> String {
    value.to_lowercase()
}

/// Helpers available as filters and under the `helpers` global.
const HELPERS: [(&str, Helper); 6] = [
    ("camel_case", camel_case),
    ("pascal_case", pascal_case),
    ("slug_case", slug_case),
    ("snake_case", snake_case),
    ("upper_case", upper_case),
    ("lower_case", lower_case),
];

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with the helpers registered.
    ///
    /// Undefined variables, and attributes looked up through them, render
    /// as empty strings. A trailing newline in the source is kept.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_keep_trailing_newline(true);
        for (name, helper) in HELPERS {
            env.add_filter(name, helper);
        }
        env.add_global(
            "helpers",
            Value::from_iter(
                HELPERS
                    .iter()
                    .map(|(name, helper)| (*name, Value::from_function(*helper))),
            ),
        );
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::RenderError` on a syntax error or a failing expression
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env
            .render_named_str(name, template, context)
            .map_err(|source| Error::RenderError {
                path: name.to_string(),
                source,
            })
    }
}
