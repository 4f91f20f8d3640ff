use crate::{compile_to_html, compile_to_json, CompileError, Element, HtmlBuilder};
use clean_parser::{parse, Builder, Properties};

#[test]
fn test_builder_renders_bare_tag() {
    let mut builder = HtmlBuilder::new();
    builder.invoke("ul", Properties::new());

    assert_eq!(builder.to_html(), "<ul></ul>");
}

#[test]
fn test_parse_ul() {
    let mut builder = HtmlBuilder::new();
    let element = parse("ul", &mut builder).expect("Failed to parse");

    assert_eq!(element.to_html(), "<ul></ul>");
}

#[test]
fn test_parse_li() {
    assert_eq!(compile_to_html("li").expect("Failed to compile"), "<li></li>");
}

#[test]
fn test_compile_with_property() {
    assert_eq!(
        compile_to_html("ul foo : 'bar'").expect("Failed to compile"),
        "<ul foo='bar'></ul>"
    );
}

#[test]
fn test_compile_matches_key() {
    assert_eq!(
        compile_to_html("ul quxx : 'bar'").expect("Failed to compile"),
        "<ul quxx='bar'></ul>"
    );
}

#[test]
fn test_compile_matches_value() {
    assert_eq!(
        compile_to_html("ul foo : 'baz'").expect("Failed to compile"),
        "<ul foo='baz'></ul>"
    );
}

#[test]
fn test_builder_keeps_every_element() {
    let mut builder = HtmlBuilder::new();
    parse("ul", &mut builder).unwrap();
    parse("li foo : 'bar'", &mut builder).unwrap();

    assert_eq!(builder.elements().len(), 2);
    assert_eq!(builder.to_html(), "<ul></ul><li foo='bar'></li>");
}

#[test]
fn test_properties_render_in_key_order() {
    let mut properties = Properties::new();
    properties.insert("zeta".to_string(), "1".to_string());
    properties.insert("alpha".to_string(), "2".to_string());

    let element = HtmlBuilder::new().invoke("div", properties);
    assert_eq!(element.to_html(), "<div alpha='2' zeta='1'></div>");
}

#[test]
fn test_children_render_inside_parent() {
    let mut list = Element::new("ul", Properties::new());
    list.push_child(Element::new("li", Properties::new()));
    list.push_child(Element::new("li", Properties::new()));

    assert_eq!(list.to_html(), "<ul><li></li><li></li></ul>");
}

#[test]
fn test_compile_to_json() {
    let json = compile_to_json("ul foo : 'bar'").expect("Failed to compile");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["tag_name"], "ul");
    assert_eq!(value["properties"]["foo"], "bar");
    assert!(value["children"].as_array().unwrap().is_empty());
}

#[test]
fn test_parse_error_is_wrapped() {
    let err = compile_to_html("ul ;").unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
}
