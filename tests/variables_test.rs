use senggen::variables::{
    coerce, deep_merge, is_truthy, name_variants, parse_number, resolve, VariableDeclaration,
    Variables,
};
use serde_json::{json, Value};

fn vars(value: Value) -> Variables {
    match value {
        Value::Object(map) => map,
        _ => panic!("Expected an object"),
    }
}

fn declaration(name: &str) -> VariableDeclaration {
    VariableDeclaration::new(name)
}

#[test]
fn test_declaration_defaults_from_json() {
    let decl: VariableDeclaration = serde_json::from_value(json!({"name": "color"})).unwrap();
    assert_eq!(decl, VariableDeclaration::new("color"));
    assert_eq!(decl.display_type, "input");

    let decl: VariableDeclaration = serde_json::from_value(json!({
        "name": "sizes",
        "default": "1,2",
        "isArray": true,
        "isNumber": true,
        "type": "confirm",
        "message": "Sizes?"
    }))
    .unwrap();
    assert!(decl.is_array && decl.is_number && !decl.is_boolean);
    assert_eq!(decl.default, Some(json!("1,2")));
    assert_eq!(decl.display_type, "confirm");
    assert_eq!(decl.message.as_deref(), Some("Sizes?"));
}

#[test]
fn test_defaults_are_kept_unchanged() {
    let mut flag = declaration("flag");
    flag.default = Some(json!(false));
    let mut count = declaration("count");
    count.default = Some(json!(0));
    let mut color = declaration("color");
    color.default = Some(json!("red"));

    let resolved = resolve("component", &Variables::new(), &[flag, count, color], "x");

    assert_eq!(resolved["flag"], json!(false));
    assert_eq!(resolved["count"], json!(0));
    assert_eq!(resolved["color"], json!("red"));
}

#[test_log::test]
fn test_missing_default_becomes_empty_string() {
    let resolved = resolve("component", &Variables::new(), &[declaration("color")], "x");
    assert_eq!(resolved["color"], json!(""));
}

#[test_log::test]
fn test_undeclared_variable_passes_through() {
    let user = vars(json!({"extra": "1,2", "nested": {"a": 1}}));
    let resolved = resolve("component", &user, &[], "x");

    assert_eq!(resolved["extra"], json!("1,2"));
    assert_eq!(resolved["nested"], json!({"a": 1}));
}

#[test]
fn test_user_value_overrides_default() {
    let mut color = declaration("color");
    color.default = Some(json!("red"));
    let user = vars(json!({"color": "blue"}));

    let resolved = resolve("component", &user, &[color], "x");
    assert_eq!(resolved["color"], json!("blue"));
}

#[test]
fn test_name_variants_override_user_values() {
    let user = vars(json!({"name_cc": "foo", "name": "bar"}));
    let resolved = resolve("component", &user, &[declaration("name_cc")], "my-thing");

    assert_eq!(resolved["name"], json!("my-thing"));
    assert_eq!(resolved["name_cc"], json!("myThing"));
    assert_eq!(resolved["name_pc"], json!("MyThing"));
    assert_eq!(resolved["name_sc"], json!("my-thing"));
    assert_eq!(resolved["name_snc"], json!("my_thing"));
}

#[test]
fn test_name_variants_from_pascal_case() {
    let variants = name_variants("UserProfile");
    assert_eq!(variants["name_cc"], json!("userProfile"));
    assert_eq!(variants["name_pc"], json!("UserProfile"));
    assert_eq!(variants["name_sc"], json!("user-profile"));
    assert_eq!(variants["name_snc"], json!("user_profile"));
}

#[test]
fn test_name_variants_share_word_boundaries() {
    let variants = name_variants("HTMLParser");
    assert_eq!(variants["name"], json!("HTMLParser"));
    assert_eq!(variants["name_cc"], json!("htmlParser"));
    assert_eq!(variants["name_pc"], json!("HtmlParser"));
    assert_eq!(variants["name_sc"], json!("html-parser"));
    assert_eq!(variants["name_snc"], json!("html_parser"));

    let variants = name_variants("button2");
    assert_eq!(variants["name_cc"], json!("button2"));
    assert_eq!(variants["name_pc"], json!("Button2"));
    assert_eq!(variants["name_sc"], json!("button-2"));
    assert_eq!(variants["name_snc"], json!("button_2"));

    let variants = name_variants("my_thing name");
    assert_eq!(variants["name_cc"], json!("myThingName"));
    assert_eq!(variants["name_sc"], json!("my-thing-name"));
}

#[test]
fn test_array_boolean_coercion() {
    let mut decl = declaration("flags");
    decl.is_array = true;
    decl.is_boolean = true;

    assert_eq!(coerce(&json!("true,false,1"), &decl), json!([true, false, true]));
    assert_eq!(coerce(&json!("true, 1 ,yes"), &decl), json!([true, true, false]));
}

#[test]
fn test_array_number_coercion() {
    let mut decl = declaration("sizes");
    decl.is_array = true;
    decl.is_number = true;

    assert_eq!(coerce(&json!("1, 2.5,3"), &decl), json!([1, 2.5, 3]));
    assert_eq!(coerce(&json!("4,abc"), &decl), json!([4, null]));
}

#[test]
fn test_array_coercion_keeps_existing_sequence() {
    let mut decl = declaration("items");
    decl.is_array = true;

    assert_eq!(coerce(&json!("a, b ,c"), &decl), json!(["a", "b", "c"]));
    assert_eq!(coerce(&json!([" a", "b,c"]), &decl), json!(["a", "b,c"]));
}

#[test]
fn test_scalar_coercion() {
    let mut boolean = declaration("flag");
    boolean.is_boolean = true;
    assert_eq!(coerce(&json!("true"), &boolean), json!(true));
    assert_eq!(coerce(&json!("1"), &boolean), json!(true));
    assert_eq!(coerce(&json!("false"), &boolean), json!(false));
    assert_eq!(coerce(&json!("TRUE"), &boolean), json!(false));

    let mut number = declaration("count");
    number.is_number = true;
    assert_eq!(coerce(&json!("42"), &number), json!(42));
    assert_eq!(coerce(&json!("2.5px"), &number), json!(2.5));
    assert_eq!(coerce(&json!("px"), &number), json!(null));

    assert_eq!(coerce(&json!("plain"), &declaration("text")), json!("plain"));
}

#[test]
fn test_boolean_wins_over_number() {
    let mut decl = declaration("both");
    decl.is_boolean = true;
    decl.is_number = true;
    assert_eq!(coerce(&json!("1"), &decl), json!(true));
}

#[test]
fn test_is_truthy() {
    assert!(is_truthy(&json!("true")));
    assert!(is_truthy(&json!("1")));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!(true)));
    assert!(!is_truthy(&json!("yes")));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!(null)));
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number(&json!(" 7 ")), json!(7));
    assert_eq!(parse_number(&json!(1.5)), json!(1.5));
    assert_eq!(parse_number(&json!(true)), json!(null));
}

#[test]
fn test_deep_merge() {
    let mut target = vars(json!({"a": {"x": 1, "y": 2}, "list": [1, 2, 3], "s": "old"}));
    deep_merge(
        &mut target,
        vars(json!({"a": {"y": 20, "z": 30}, "list": [9], "s": {"now": "object"}})),
    );

    assert_eq!(
        Value::Object(target),
        json!({"a": {"x": 1, "y": 20, "z": 30}, "list": [9], "s": {"now": "object"}})
    );
}
