use senggen::error::Error;
use senggen::generate::{generate, GenerateOptions};
use senggen::renderer::MiniJinjaRenderer;
use senggen::settings::{get_settings, FileSettingsStore, Settings, SettingsFile};
use senggen::variables::Variables;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, b'{', b'{', 0x00];

/// Writes a `component` template below `root/templates` and returns the settings for it.
fn setup_template(root: &Path) -> Settings {
    let template = root.join("templates/component");
    fs::create_dir_all(template.join("{name}/assets")).unwrap();
    fs::write(
        template.join(".senggenerator"),
        r#"{"variables": [
            {"name": "style", "default": "css"},
            {"name": "withTests", "isBoolean": true, "default": false},
            {"name": "sizes", "isArray": true, "isNumber": true, "default": []}
        ]}"#,
    )
    .unwrap();
    fs::write(
        template.join("{name}/{name_pc}.js"),
        "export function {{ name_pc }}() {}\n{% if withTests %}// tested\n{% endif %}",
    )
    .unwrap();
    fs::write(template.join("{name}/{name_pc}.${style}"), ".{{ name_sc }} {}\n").unwrap();
    fs::write(template.join("{name}/sizes.txt"), "{{ sizes | join(\"-\") }}\n").unwrap();
    fs::write(template.join("{name}/assets/logo.png"), PNG_BYTES).unwrap();
    fs::write(template.join("{name}/.hidden"), "secret").unwrap();

    let store = FileSettingsStore::new(None, root);
    let overrides = SettingsFile {
        template_path: Some(root.join("templates").display().to_string()),
        ..Default::default()
    };
    get_settings(&store, overrides).unwrap()
}

fn options(destination: PathBuf, variables: serde_json::Value, force: bool) -> GenerateOptions {
    let variables: Variables = match variables {
        serde_json::Value::Object(map) => map,
        _ => Variables::new(),
    };
    GenerateOptions {
        name: "my-button".to_string(),
        destination,
        variables,
        force,
    }
}

#[test]
fn test_generate_matches_expected_tree() {
    let temp_dir = TempDir::new().unwrap();
    let settings = setup_template(temp_dir.path());
    let destination = temp_dir.path().join("out");

    let expected = temp_dir.path().join("expected/my-button");
    fs::create_dir_all(expected.join("assets")).unwrap();
    fs::write(expected.join("MyButton.js"), "export function MyButton() {}\n// tested\n").unwrap();
    fs::write(expected.join("MyButton.scss"), ".my-button {}\n").unwrap();
    fs::write(expected.join("sizes.txt"), "1-2.5\n").unwrap();
    fs::write(expected.join("assets/logo.png"), PNG_BYTES).unwrap();

    let engine = MiniJinjaRenderer::new();
    let written = generate(
        "component",
        &options(
            destination.clone(),
            json!({"style": "scss", "withTests": "true", "sizes": "1, 2.5"}),
            false,
        ),
        &settings,
        &engine,
    )
    .unwrap();

    assert_eq!(written.len(), 4);
    assert!(!dir_diff::is_different(destination, temp_dir.path().join("expected")).unwrap());
}

#[test]
fn test_generate_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings = setup_template(temp_dir.path());
    let destination = temp_dir.path().join("out");

    let engine = MiniJinjaRenderer::new();
    generate("component", &options(destination.clone(), json!({}), false), &settings, &engine)
        .unwrap();

    let component = destination.join("my-button");
    assert!(component.join("MyButton.css").exists());
    assert!(!component.join(".hidden").exists());
    assert!(!destination.join("{name}").exists());
    assert_eq!(
        fs::read_to_string(component.join("MyButton.js")).unwrap(),
        "export function MyButton() {}\n"
    );
    assert_eq!(fs::read(component.join("assets/logo.png")).unwrap(), PNG_BYTES);
}

#[test]
fn test_generate_collision_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let settings = setup_template(temp_dir.path());
    let destination = temp_dir.path().join("out");
    fs::create_dir_all(destination.join("my-button")).unwrap();
    fs::write(destination.join("my-button/MyButton.js"), "old").unwrap();

    let engine = MiniJinjaRenderer::new();
    let result =
        generate("component", &options(destination.clone(), json!({}), false), &settings, &engine);

    match result {
        Err(Error::CollisionError { path, count }) => {
            assert_eq!(path, destination.join("my-button/MyButton.js"));
            assert_eq!(count, 1);
        }
        other => panic!("Expected CollisionError, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(destination.join("my-button/MyButton.js")).unwrap(), "old");
    assert!(!destination.join("my-button/MyButton.css").exists());

    generate("component", &options(destination.clone(), json!({}), true), &settings, &engine)
        .unwrap();
    assert_eq!(
        fs::read_to_string(destination.join("my-button/MyButton.js")).unwrap(),
        "export function MyButton() {}\n"
    );
    assert!(destination.join("my-button/MyButton.css").exists());
}

#[test]
fn test_generate_render_error_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let settings = setup_template(temp_dir.path());
    fs::write(
        temp_dir.path().join("templates/component/{name}/broken.js"),
        "{% if %}",
    )
    .unwrap();
    let destination = temp_dir.path().join("out");

    let engine = MiniJinjaRenderer::new();
    let result =
        generate("component", &options(destination.clone(), json!({}), false), &settings, &engine);

    match result {
        Err(Error::RenderError { path, .. }) => assert_eq!(path, "my-button/broken.js"),
        other => panic!("Expected RenderError, got {other:?}"),
    }
    assert!(!destination.exists());
}

#[test]
fn test_generate_rejects_paths_outside_destination() {
    let temp_dir = TempDir::new().unwrap();
    let settings = setup_template(temp_dir.path());
    fs::write(temp_dir.path().join("templates/component/{dir}.txt"), "x").unwrap();
    let destination = temp_dir.path().join("a/b/out");

    let engine = MiniJinjaRenderer::new();
    let request = options(destination.clone(), json!({"dir": "../../escaped"}), true);
    let result = generate("component", &request, &settings, &engine);

    assert!(matches!(result, Err(Error::PathEscapeError { .. })));
    assert!(!temp_dir.path().join("a/escaped.txt").exists());
    assert!(!destination.exists());
}

#[test]
fn test_generate_unknown_template() {
    let temp_dir = TempDir::new().unwrap();
    let settings = setup_template(temp_dir.path());
    let destination = temp_dir.path().join("out");

    let engine = MiniJinjaRenderer::new();
    let request = options(destination.clone(), json!({}), false);
    let result = generate("service", &request, &settings, &engine);

    assert!(matches!(result, Err(Error::TemplateNotFoundError { .. })));
    assert!(!destination.exists());
}

#[test]
fn test_generate_keeps_unrelated_destination_files() {
    let temp_dir = TempDir::new().unwrap();
    let settings = setup_template(temp_dir.path());
    let destination = temp_dir.path().join("out");
    fs::create_dir_all(&destination).unwrap();
    fs::write(destination.join("package.json"), "{}").unwrap();

    let engine = MiniJinjaRenderer::new();
    generate("component", &options(destination.clone(), json!({}), false), &settings, &engine)
        .unwrap();

    assert_eq!(fs::read_to_string(destination.join("package.json")).unwrap(), "{}");
}
