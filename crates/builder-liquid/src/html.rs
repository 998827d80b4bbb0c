//! Block serialization.
//!
//! Walks an element and its children depth-first, writing markup into a
//! [`Fragments`] accumulator. Each block's CSS either goes inline as a
//! `<style>` tag right before the block, or into the accumulator's style
//! set when the caller wants the styles gathered separately.

use crate::attrs::attributes;
use crate::css::block_css;
use crate::CompileOptions;
use builder_content::Element;
use indexmap::IndexSet;
use tracing::trace;

/// Tag used for elements without a `tagName`.
pub const DEFAULT_TAG: &str = "div";

/// Markup plus the style bodies met along the way.
#[derive(Debug, Default)]
pub struct Fragments {
    pub html: String,
    /// Distinct style bodies in first-seen order. Only filled when collecting.
    pub styles: IndexSet<String>,
    collect_styles: bool,
}

impl Fragments {
    /// Accumulator that writes `<style>` tags into the markup.
    pub fn inline() -> Self {
        Self::default()
    }

    /// Accumulator that gathers style bodies into [`Fragments::styles`].
    pub fn collecting() -> Self {
        Self {
            collect_styles: true,
            ..Self::default()
        }
    }

    fn push_style(&mut self, css: String) {
        if self.collect_styles {
            self.styles.insert(css);
        } else {
            self.html.push_str("<style>");
            self.html.push_str(&css);
            self.html.push_str("</style>");
        }
    }
}

/// Render `el` and its subtree with inline `<style>` tags.
pub fn render_block(el: &Element, options: &CompileOptions) -> String {
    let mut out = Fragments::inline();
    write_block(el, options, &mut out);
    out.html
}

/// Write `el` and its subtree into `out`.
pub fn write_block(el: &Element, options: &CompileOptions, out: &mut Fragments) {
    trace!(id = %el.id, children = el.children.len(), "serializing block");

    let css = block_css(el, options);
    if !css.trim().is_empty() {
        out.push_style(css);
    }

    let tag = el.tag_name.as_deref().unwrap_or(DEFAULT_TAG);

    // User properties come first; `builder-id` and `class` override any
    // same-named property in place.
    let mut attrs = el.properties.clone();
    attrs.insert("builder-id".to_string(), Some(el.id.clone()));
    attrs.insert("class".to_string(), Some(block_class(el)));

    out.html.push('<');
    out.html.push_str(tag);
    out.html.push_str(&attributes(&attrs));
    out.html.push('>');

    for child in &el.children {
        write_block(child, options, out);
    }

    out.html.push_str(&format!("</{tag}>"));
}

/// `builder-block <id>` plus the element's own class, if any.
fn block_class(el: &Element) -> String {
    match el.class.as_deref() {
        Some(extra) if !extra.is_empty() => format!("builder-block {} {extra}", el.id),
        _ => format!("builder-block {}", el.id),
    }
}
