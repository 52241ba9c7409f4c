//! Variable resolution for templates.
//! Merges a template's declared variables, their defaults and the values the
//! user supplied into the final set of variables used for rendering.

use crate::case::{camel_case, pascal_case, slug_case, snake_case};
use crate::constants::DEFAULT_VARIABLE_TYPE;
use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// The resolved variables of a generation request, keyed by variable name.
pub type Variables = Map<String, Value>;

/// Leading floating-point literal, the part of a string `parseFloat` would read.
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float regex")
});

/// A variable declared by a template in its `.senggenerator` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub is_boolean: bool,
    #[serde(default)]
    pub is_number: bool,
    /// How the prompt asks for this variable (`input` or `confirm`)
    #[serde(rename = "type", default = "default_variable_type")]
    pub display_type: String,
    /// Question shown when prompting; the variable name is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_variable_type() -> String {
    DEFAULT_VARIABLE_TYPE.to_string()
}

impl VariableDeclaration {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            default: None,
            is_array: false,
            is_boolean: false,
            is_number: false,
            display_type: default_variable_type(),
            message: None,
        }
    }
}

/// Resolves the variables for a single generation request.
///
/// Precedence, later wins: declared defaults, coerced user values, then the
/// name variants derived from `name`. Problems with individual variables are
/// logged as warnings and never abort resolution.
pub fn resolve(
    template: &str,
    user_variables: &Variables,
    declarations: &[VariableDeclaration],
    name: &str,
) -> Variables {
    let lookup: IndexMap<&str, &VariableDeclaration> =
        declarations.iter().map(|decl| (decl.name.as_str(), decl)).collect();

    let mut variables = defaults_layer(template, &lookup, user_variables);
    deep_merge(&mut variables, user_layer(template, &lookup, user_variables));
    deep_merge(&mut variables, name_variants(name));

    debug!("Resolved variables for template '{}': {:?}", template, variables);
    variables
}

fn defaults_layer(
    template: &str,
    lookup: &IndexMap<&str, &VariableDeclaration>,
    user_variables: &Variables,
) -> Variables {
    let mut layer = Map::new();
    for declaration in lookup.values() {
        if declaration.default.is_none() && !user_variables.contains_key(&declaration.name) {
            warn!(
                "Variable '{}' of template '{}' is not supplied and has no default value",
                declaration.name, template
            );
        }
        let default = declaration
            .default
            .clone()
            .unwrap_or_else(|| Value::String(String::new()));
        layer.insert(declaration.name.clone(), default);
    }
    layer
}

fn user_layer(
    template: &str,
    lookup: &IndexMap<&str, &VariableDeclaration>,
    user_variables: &Variables,
) -> Variables {
    user_variables
        .iter()
        .map(|(key, value)| {
            let value = match lookup.get(key.as_str()) {
                Some(declaration) => coerce(value, declaration),
                None => {
                    warn!(
                        "Variable '{}' is not declared in the settings of template '{}'",
                        key, template
                    );
                    value.clone()
                }
            };
            (key.clone(), value)
        })
        .collect()
}

/// Coerces a raw user value according to its declaration's flags.
///
/// Arrays are split on commas and each element trimmed; booleans win over
/// numbers when both flags are set.
pub fn coerce(value: &Value, declaration: &VariableDeclaration) -> Value {
    if declaration.is_array {
        let items = match value {
            Value::Array(items) => items.clone(),
            other => display_value(other)
                .split(',')
                .map(|item| Value::String(item.to_string()))
                .collect(),
        };
        let items = items.into_iter().map(|item| match item {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other,
        });
        let items: Vec<Value> = if declaration.is_boolean {
            items.map(|item| Value::Bool(is_truthy(&item))).collect()
        } else if declaration.is_number {
            items.map(|item| parse_number(&item)).collect()
        } else {
            items.collect()
        };
        Value::Array(items)
    } else if declaration.is_boolean {
        Value::Bool(is_truthy(value))
    } else if declaration.is_number {
        parse_number(value)
    } else {
        value.clone()
    }
}

/// True for the string `"true"` and for anything numerically equal to 1.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s == "true" || s.trim().parse::<f64>().ok() == Some(1.0),
        _ => false,
    }
}

/// Parses the leading floating-point literal of a value, `null` when there is none.
pub fn parse_number(value: &Value) -> Value {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    };
    parsed.map(number_value).unwrap_or(Value::Null)
}

fn parse_float(text: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

// Integral values are kept as integers so they render as `3` rather than `3.0`.
fn number_value(number: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        Value::from(number as i64)
    } else {
        serde_json::Number::from_f64(number).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Derives the name variants every template can use.
///
/// | key        | `my-thing` |
/// |------------|------------|
/// | `name`     | `my-thing` |
/// | `name_cc`  | `myThing`  |
/// | `name_pc`  | `MyThing`  |
/// | `name_sc`  | `my-thing` |
/// | `name_snc` | `my_thing` |
///
/// All four cases share one word split, see [`crate::case::words`].
pub fn name_variants(name: &str) -> Variables {
    let mut variants = Map::new();
    variants.insert("name".to_string(), Value::from(name));
    variants.insert("name_cc".to_string(), Value::from(camel_case(name)));
    variants.insert("name_pc".to_string(), Value::from(pascal_case(name)));
    variants.insert("name_sc".to_string(), Value::from(slug_case(name)));
    variants.insert("name_snc".to_string(), Value::from(snake_case(name)));
    variants
}

/// Recursively merges `source` into `target`.
///
/// Objects are merged key by key; any other value replaces the target's
/// value outright, arrays included.
pub fn deep_merge(target: &mut Variables, source: Variables) {
    for (key, value) in source {
        match value {
            Value::Object(incoming) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => deep_merge(existing, incoming),
                _ => {
                    target.insert(key, Value::Object(incoming));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Formats a variable value for use inside a path.
///
/// Strings are verbatim, arrays are joined with `,` and `null` is empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
