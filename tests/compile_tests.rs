//! End-to-end tests: script text in, named path-data and SVG files out.

use pretty_assertions::assert_eq;

use iconscript::{CompiledIcon, compile, interpret_script, svg};

#[test]
fn script_with_multiple_icons_compiles_in_order() {
    let source = "
        { %box s 2,2 14,14 }
        { c 8,8 4 }
        { %temp lf 2,2 14,2 8,14 }
    ";
    let compiled = compile(source).unwrap();
    let names: Vec<&str> = compiled.iter().map(|icon| icon.name.as_str()).collect();
    assert_eq!(names, vec!["box", "icon_0", "icon_1"]);
    for icon in &compiled {
        assert!(
            icon.path_data.starts_with("M "),
            "icon `{}` has no path-data",
            icon.name
        );
        assert!(icon.path_data.ends_with('Z'), "icon `{}` is not closed", icon.name);
    }
}

#[test]
fn rectangle_icon_has_exact_path_data() {
    let compiled = compile("{ s 1,1 2,2 }").unwrap();
    assert_eq!(
        compiled[0].path_data,
        "M 1,1 L 2,1 L 2,2 L 1,2 L 1,1 Z"
    );
}

#[test]
fn circle_icon_emits_bezier_before_union_outline() {
    let compiled = compile("{ c 8,8 4 }").unwrap();
    let path = &compiled[0].path_data;
    // Bezier approximation first, then the unioned polygon.
    assert!(path.starts_with("M "));
    assert_eq!(path.matches('C').count(), 4);
    let bezier_end = path.find('Z').expect("bezier subpath is closed");
    assert!(path[bezier_end..].contains("L "), "polygon outline missing");
}

#[test]
fn composing_the_same_script_twice_is_byte_identical() {
    let source = "{ w 2 l 2,2 14,14 c 8,8 3 s 1,1 4,4 }";
    let first = compile(source).unwrap();
    let second = compile(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_icon_compiles_to_empty_path_data() {
    let compiled = compile("{ }").unwrap();
    assert_eq!(
        compiled,
        vec![CompiledIcon {
            name: "icon_0".to_string(),
            path_data: String::new(),
        }]
    );
}

#[test]
fn arcs_are_excluded_from_union_geometry() {
    // An icon of one arc and one rectangle renders only the rectangle.
    let with_arc = compile("{ ar 8,8 4 0 1.5 s 1,1 2,2 }").unwrap();
    let without_arc = compile("{ s 1,1 2,2 }").unwrap();
    assert_eq!(with_arc[0].path_data, without_arc[0].path_data);
}

#[test]
fn near_zero_coordinates_never_serialize_as_negative_zero() {
    // A disk touching x=0 produces vertices a hair below zero; they must
    // round to plain "0", not "-0".
    let compiled = compile("{ c 0,2 2 }").unwrap();
    for token in compiled[0].path_data.split([' ', ',']) {
        assert_ne!(token, "-0");
    }
}

#[test]
fn variables_expand_into_icons() {
    let source = "
        eye = { c 5,5 1 }
        { @eye l 2,8 14,8 }
    ";
    let icons = interpret_script(source).unwrap();
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].figures.len(), 2);
}

#[test]
fn single_point_line_fails_naming_the_icon() {
    let err = compile("{ %broken l 5,5 }").unwrap_err();
    assert!(err.to_string().contains("broken"));
}

#[test]
fn parse_failure_reports_a_diagnostic() {
    let err = compile("{ l 0,0 1,1").unwrap_err();
    assert_eq!(err.to_string(), "parse error");
}

#[test]
fn write_icons_produces_svg_files() {
    let dir = std::env::temp_dir().join(format!(
        "iconscript-compile-test-{}",
        std::process::id()
    ));
    let compiled = compile("{ %badge s 2,2 14,14 } { }").unwrap();
    let written = svg::write_icons(&dir, &compiled).unwrap();
    assert_eq!(written, 1);

    let text = std::fs::read_to_string(dir.join("badge.svg")).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains(r#"viewBox="0 0 16 16""#));
    assert!(text.contains(r#"fill="black" stroke="none""#));
    let _ = std::fs::remove_dir_all(&dir);
}
