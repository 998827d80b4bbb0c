//! Builder Liquid
//!
//! Compiles a builder document's block tree into static markup for
//! server-side templates (liquid themes, email). Every block becomes a tag
//! carrying `builder-id` and a `builder-block <id>` class; its responsive
//! styles become CSS rules scoped to that class.
//!
//! ```text
//! Document → compile() → CompiledOutput::Inline { html }
//!                      | CompiledOutput::Split  { html, css }
//! ```
//!
//! Compilation is a pure function of its input: no I/O, no state kept
//! between calls.

pub mod attrs;
pub mod css;
pub mod html;
pub mod tag;

use builder_content::{Document, PropertyMap};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

pub use html::render_block;
pub use tag::{placeholder_tag, runtime_tag, RuntimeTag};

/// Output switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Scope styles to `.<id>-subject`, mark them `!important`, and drop
    /// base rules.
    pub email_mode: bool,
    /// Return the CSS separately instead of prefixing it to the markup.
    pub extract_css: bool,
}

/// The compiled form of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompiledOutput {
    /// Styles inlined as a leading `<style class="builder-styles">` tag.
    Inline { html: String },
    /// Markup and styles as separate strings.
    Split { html: String, css: String },
}

impl CompiledOutput {
    pub fn html(&self) -> &str {
        match self {
            CompiledOutput::Inline { html } | CompiledOutput::Split { html, .. } => html,
        }
    }

    /// The extracted CSS, if compiled with `extract_css`.
    pub fn css(&self) -> Option<&str> {
        match self {
            CompiledOutput::Inline { .. } => None,
            CompiledOutput::Split { css, .. } => Some(css),
        }
    }
}

/// Compile `doc` into markup.
///
/// `model_name` labels the container; when empty the document's own
/// `modelName` is used. Absent blocks yield an empty container.
pub fn compile(doc: &Document, model_name: &str, options: &CompileOptions) -> CompiledOutput {
    let model = if model_name.is_empty() {
        doc.model_name.as_deref().unwrap_or_default()
    } else {
        model_name
    };

    let mut fragments = html::Fragments::collecting();
    for block in doc.blocks() {
        html::write_block(block, options, &mut fragments);
    }

    let container = container_attributes(&doc.id, model);
    let html = format!("<div{}>{}</div>", attrs::attributes(&container), fragments.html);
    let css = normalize_css(fragments.styles.iter().map(String::as_str));

    debug!(
        document = %doc.id,
        model,
        blocks = doc.blocks().len(),
        rules = fragments.styles.len(),
        css_bytes = css.len(),
        "compiled document"
    );

    if options.extract_css {
        CompiledOutput::Split { html, css }
    } else {
        CompiledOutput::Inline {
            html: format!("<style type=\"text/css\" class=\"builder-styles\">{css}</style>{html}"),
        }
    }
}

fn container_attributes(id: &str, model: &str) -> PropertyMap {
    [
        ("class", "builder-content"),
        ("builder-content-id", id),
        ("data-builder-content-id", id),
        ("data-builder-component", model),
        ("builder-model", model),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), Some(value.to_string())))
    .collect()
}

static EMPTY_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \S+:\s+;").expect("valid regex"));

/// Join style bodies into one stylesheet string.
///
/// Decodes `&gt;` and `&quot;`, drops declarations with no value, and
/// collapses every whitespace run to a single space.
pub fn normalize_css<'a>(bodies: impl IntoIterator<Item = &'a str>) -> String {
    let joined = bodies
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("&gt;", ">")
        .replace("&quot;", "\"");
    let stripped = EMPTY_DECLARATION.replace_all(&joined, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use builder_content::{Element, Size};
    use pretty_assertions::assert_eq;

    fn split() -> CompileOptions {
        CompileOptions {
            extract_css: true,
            ..CompileOptions::default()
        }
    }

    // =========================================================================
    // normalize_css
    // =========================================================================

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_css(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_css([".a {\n  color: red;}", "\n.b {\n    top: 0; } "]),
            ".a { color: red;} .b { top: 0; }"
        );
    }

    #[test]
    fn test_normalize_decodes_entities() {
        assert_eq!(
            normalize_css([".a &gt; .b { content: &quot;x&quot;;}"]),
            ".a > .b { content: \"x\";}"
        );
    }

    #[test]
    fn test_normalize_strips_empty_declarations() {
        assert_eq!(normalize_css([".a { color: ; top: 0;}"]), ".a { top: 0;}");
    }

    // =========================================================================
    // compile
    // =========================================================================

    #[test]
    fn test_compile_empty_document() {
        let doc = Document::new("doc1").with_model_name("page");
        let output = compile(&doc, "", &split());
        assert_eq!(
            output,
            CompiledOutput::Split {
                html: "<div class=\"builder-content\" builder-content-id=\"doc1\" \
                       data-builder-content-id=\"doc1\" data-builder-component=\"page\" \
                       builder-model=\"page\"></div>"
                    .to_string(),
                css: String::new(),
            }
        );
    }

    #[test]
    fn test_compile_model_argument_wins() {
        let doc = Document::new("doc1").with_model_name("page");
        let output = compile(&doc, "section", &split());
        assert!(output.html().contains("builder-model=\"section\""));
        assert!(!output.html().contains("\"page\""));
    }

    #[test]
    fn test_compile_inline() {
        let doc = Document::new("doc1")
            .with_blocks(vec![Element::new("b1").with_style(Size::Large, "color", "red")]);
        let output = compile(&doc, "page", &CompileOptions::default());
        assert_eq!(output.css(), None);
        assert_eq!(
            output.html(),
            "<style type=\"text/css\" class=\"builder-styles\">.builder-block.b1 { color: red;}</style>\
             <div class=\"builder-content\" builder-content-id=\"doc1\" \
             data-builder-content-id=\"doc1\" data-builder-component=\"page\" builder-model=\"page\">\
             <div builder-id=\"b1\" class=\"builder-block b1\"></div></div>"
        );
    }

    #[test]
    fn test_compiled_output_serializes_untagged() {
        let inline = CompiledOutput::Inline { html: "<p></p>".into() };
        assert_eq!(serde_json::to_string(&inline).unwrap(), r#"{"html":"<p></p>"}"#);

        let split = CompiledOutput::Split {
            html: "<p></p>".into(),
            css: ".a{}".into(),
        };
        assert_eq!(
            serde_json::to_string(&split).unwrap(),
            r#"{"html":"<p></p>","css":".a{}"}"#
        );
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: CompileOptions = serde_json::from_str(r#"{"emailMode": true}"#).unwrap();
        assert_eq!(
            options,
            CompileOptions {
                email_mode: true,
                extract_css: false
            }
        );
        let options: CompileOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CompileOptions::default());
    }
}
