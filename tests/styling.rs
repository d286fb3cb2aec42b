//! RSS resolution and stylesheet generation

use rml::rml::styling::{available_properties, available_values, to_inline_style};
use rml::{generate_stylesheet, resolve_declarations, Transpiler};
use rstest::rstest;

#[rstest]
#[case::radius_unit("radius: 10;", "border-radius: 10px;")]
#[case::unknown_dropped("bogus: 1;", "")]
#[case::mixed("bogus: 1; color: red;", "color: #ff0000;")]
#[case::case_insensitive("COLOR: RED;", "color: #ff0000;")]
#[case::explicit_unit("margin: 2em;", "margin: 2em;")]
#[case::no_unit_for_color("color: 10;", "color: 10;")]
#[case::whitespace("  size :  large  ;  ", "font-size: 24px;")]
#[case::missing_semicolon("bg: blue", "background-color: #0000ff;")]
fn test_resolve_declarations(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(to_inline_style(&resolve_declarations(source)), expected);
}

#[test]
fn test_stylesheet_snapshot() {
    let source = "[color: red;]\n\ntitle {\n  [color: blue;]\n  [size: large;]\n}\n\ncard, .custom {\n  [bg: blue;]\n  [radius: 8;]\n}\n\nnothing {\n  [bogus: 1;]\n}\n";
    let css = generate_stylesheet(source).to_string();
    insta::assert_snapshot!(css.trim_end(), @r"
    body {
      color: #ff0000;
    }

    h1 {
      color: #0000ff;
      font-size: 24px;
    }

    .rml-card, .custom {
      background-color: #0000ff;
      border-radius: 8px;
    }
    ");
}

#[test]
fn test_empty_stylesheet_adds_no_style_block() {
    let html = Transpiler::new().parse_with_styles("{bold}b{.bold}", "title { [bogus: 1;] }");
    assert_eq!(html, "<strong>b</strong>");
}

#[test]
fn test_introspection_lists() {
    let properties = available_properties();
    assert!(properties.contains(&"radius"));
    assert!(properties.contains(&"color"));

    let values = available_values();
    assert!(values.contains(&"red"));
    assert!(values.contains(&"large"));
}
