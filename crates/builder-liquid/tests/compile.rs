//! End-to-end compilation of builder documents.

use builder_content::{Document, Element, Size};
use builder_liquid::{compile, CompileOptions, CompiledOutput};
use pretty_assertions::assert_eq;

const CONTAINER: &str = "<div class=\"builder-content\" builder-content-id=\"doc1\" \
                         data-builder-content-id=\"doc1\" data-builder-component=\"page\" \
                         builder-model=\"page\">";

fn options(email_mode: bool, extract_css: bool) -> CompileOptions {
    CompileOptions {
        email_mode,
        extract_css,
    }
}

fn document(blocks: Vec<Element>) -> Document {
    Document::new("doc1").with_model_name("page").with_blocks(blocks)
}

fn css_of(output: &CompiledOutput) -> &str {
    output.css().expect("compiled with extract_css")
}

#[test]
fn test_determinism() {
    let doc = document(vec![
        Element::new("a")
            .with_style(Size::Large, "color", "red")
            .with_style(Size::Medium, "color", "blue")
            .with_child(Element::new("b").with_tag("span")),
        Element::new("c").with_class("hero"),
    ]);

    for flags in [(false, false), (false, true), (true, false), (true, true)] {
        let opts = options(flags.0, flags.1);
        assert_eq!(compile(&doc, "page", &opts), compile(&doc, "page", &opts));
    }
}

#[test]
fn test_siblings_with_same_styles_keep_their_own_rules() {
    let doc = document(vec![
        Element::new("a").with_style(Size::Large, "color", "red"),
        Element::new("b").with_style(Size::Large, "color", "red"),
    ]);
    let output = compile(&doc, "page", &options(false, true));
    assert_eq!(
        css_of(&output),
        ".builder-block.a { color: red;} .builder-block.b { color: red;}"
    );
}

#[test]
fn test_only_exact_duplicates_collapse() {
    let block = Element::new("a").with_style(Size::Large, "color", "red");
    let doc = document(vec![block.clone(), block]);
    let output = compile(&doc, "page", &options(false, true));
    assert_eq!(css_of(&output), ".builder-block.a { color: red;}");
    assert_eq!(output.html().matches("builder-id=\"a\"").count(), 2);
}

#[test]
fn test_xsmall_and_large_produce_no_media_queries() {
    let doc = document(vec![Element::new("a")
        .with_style(Size::Large, "color", "red")
        .with_style(Size::XSmall, "color", "blue")]);
    let output = compile(&doc, "page", &options(false, true));
    assert!(!css_of(&output).contains("@media"));
    assert_eq!(css_of(&output), ".builder-block.a { color: red;}");
}

#[test]
fn test_responsive_breakpoints() {
    let doc = document(vec![Element::new("a")
        .with_style(Size::Large, "fontSize", "20px")
        .with_style(Size::Medium, "fontSize", "16px")
        .with_style(Size::Small, "fontSize", "12px")]);
    let output = compile(&doc, "page", &options(false, true));
    assert_eq!(
        css_of(&output),
        ".builder-block.a { font-size: 20px;} \
         @media only screen and (max-width: 991px) { .builder-block.a { font-size: 16px; } } \
         @media only screen and (max-width: 640px) { .builder-block.a { font-size: 12px; } }"
    );
}

#[test]
fn test_email_mode_selectors() {
    let doc = document(vec![Element::new("a")
        .with_style(Size::Large, "color", "red")
        .with_style(Size::Small, "color", "blue")
        .with_style(Size::Small, "paddingTop", "2px")]);
    let output = compile(&doc, "page", &options(true, true));
    let css = css_of(&output);
    assert_eq!(
        css,
        "@media only screen and (max-width: 640px) { .a-subject { color: blue !important; padding-top: 2px !important; } }"
    );
    assert!(!css.contains(".builder-block"));
}

#[test]
fn test_email_mode_large_only_has_no_css() {
    let doc = document(vec![Element::new("a").with_style(Size::Large, "color", "red")]);
    let output = compile(&doc, "page", &options(true, true));
    assert_eq!(css_of(&output), "");
}

#[test]
fn test_extract_css_toggle() {
    let doc = document(vec![Element::new("a").with_style(Size::Large, "color", "red")]);
    let block = "<div builder-id=\"a\" class=\"builder-block a\"></div>";

    let inline = compile(&doc, "page", &options(false, false));
    assert_eq!(
        inline,
        CompiledOutput::Inline {
            html: format!(
                "<style type=\"text/css\" class=\"builder-styles\">.builder-block.a {{ color: red;}}</style>{CONTAINER}{block}</div>"
            ),
        }
    );

    let split = compile(&doc, "page", &options(false, true));
    assert_eq!(
        split,
        CompiledOutput::Split {
            html: format!("{CONTAINER}{block}</div>"),
            css: ".builder-block.a { color: red;}".to_string(),
        }
    );
}

#[test]
fn test_empty_tree() {
    let absent = Document::new("doc1").with_model_name("page");
    let empty = document(Vec::new());

    for doc in [absent, empty] {
        let split = compile(&doc, "page", &options(false, true));
        assert_eq!(split.html(), format!("{CONTAINER}</div>"));
        assert_eq!(css_of(&split), "");

        let inline = compile(&doc, "page", &options(false, false));
        assert_eq!(
            inline.html(),
            format!("<style type=\"text/css\" class=\"builder-styles\"></style>{CONTAINER}</div>")
        );
    }
}

#[test]
fn test_attribute_merge_order() {
    let doc = document(vec![Element::new("a")
        .with_property("data-x", "1")
        .with_class("foo")]);
    let output = compile(&doc, "page", &options(false, true));
    assert!(output
        .html()
        .contains("<div data-x=\"1\" builder-id=\"a\" class=\"builder-block a foo\"></div>"));
}

#[test]
fn test_nested_styles_are_hoisted_in_tree_order() {
    let doc = document(vec![
        Element::new("outer")
            .with_style(Size::Large, "display", "flex")
            .with_child(Element::new("inner").with_style(Size::Large, "flexGrow", "1")),
        Element::new("next").with_style(Size::Large, "margin", "0"),
    ]);
    let output = compile(&doc, "page", &options(false, true));
    assert_eq!(
        css_of(&output),
        ".builder-block.outer { display: flex;} \
         .builder-block.inner { flex-grow: 1;} \
         .builder-block.next { margin: 0;}"
    );
    assert_eq!(
        output.html(),
        format!(
            "{CONTAINER}<div builder-id=\"outer\" class=\"builder-block outer\">\
             <div builder-id=\"inner\" class=\"builder-block inner\"></div></div>\
             <div builder-id=\"next\" class=\"builder-block next\"></div></div>"
        )
    );
}

#[test]
fn test_compile_from_json() {
    let doc = Document::from_json(
        r#"{
            "id": "doc1",
            "modelName": "page",
            "data": {
                "blocks": [{
                    "@type": "@builder.io/sdk:Element",
                    "id": "builder-1",
                    "tagName": "a",
                    "properties": {"href": "/shop"},
                    "responsiveStyles": {
                        "large": {"textDecoration": "none", "color": ""},
                        "medium": {"display": "block"}
                    },
                    "children": [{"id": "builder-2", "tagName": "span"}]
                }]
            }
        }"#,
    )
    .unwrap();

    let output = compile(&doc, "", &options(false, true));
    assert_eq!(
        css_of(&output),
        ".builder-block.builder-1 { text-decoration: none;} \
         @media only screen and (max-width: 991px) { .builder-block.builder-1 { display: block; } } \
         .builder-block.builder-2 {}"
    );
    assert!(output.html().starts_with(CONTAINER));
    assert!(output.html().contains(
        "<a href=\"/shop\" builder-id=\"builder-1\" class=\"builder-block builder-1\">\
         <span builder-id=\"builder-2\" class=\"builder-block builder-2\"></span></a>"
    ));
}

#[test]
fn test_malformed_blocks_compile_to_empty_container() {
    let doc = Document::from_json(r#"{"id": "doc1", "modelName": "page", "data": {"blocks": 7}}"#)
        .unwrap();
    let output = compile(&doc, "", &options(false, true));
    assert_eq!(output.html(), format!("{CONTAINER}</div>"));
}

#[test]
fn test_bad_nested_block_keeps_the_rest_of_the_tree() {
    let doc = Document::from_json(
        r#"{"id": "doc1", "modelName": "page", "data": {"blocks": [
            {"id": "a"},
            {"id": "b", "children": [{"tagName": "span"}]},
            {"id": "c", "responsiveStyles": {"large": {"zIndex": 1}}}
        ]}}"#,
    )
    .unwrap();

    let output = compile(&doc, "", &options(false, true));
    assert_eq!(
        output.html(),
        format!(
            "{CONTAINER}<div builder-id=\"a\" class=\"builder-block a\"></div>\
             <div builder-id=\"b\" class=\"builder-block b\"></div>\
             <div builder-id=\"c\" class=\"builder-block c\"></div></div>"
        )
    );
    assert_eq!(
        css_of(&output),
        ".builder-block.a {} .builder-block.b {} .builder-block.c { z-index: 1;}"
    );
}
