//! CSS generation for single blocks.
//!
//! A block's `large` styles form its base rule. Narrower breakpoints become
//! `max-width` media queries layered on top, widest first. `xsmall` never
//! gets a query of its own.
//!
//! A breakpoint can only add or override declarations. It cannot unset one
//! inherited from a wider breakpoint, so a property set at `large` and
//! dropped at `small` still applies at `small`.

use crate::CompileOptions;
use builder_content::size::{breakpoint, Size};
use builder_content::{Element, StyleMap};
use heck::ToKebabCase;

/// Indentation of base rule declarations.
pub const BASE_INDENT: usize = 2;
/// Indentation of declarations nested in a media query.
pub const MEDIA_INDENT: usize = 4;

/// Serialize `styles` as newline-prefixed `property: value;` declarations.
///
/// Property names are kebab-cased. Blank values are skipped.
pub fn declarations(styles: &StyleMap, indent: usize, important: bool) -> String {
    let pad = " ".repeat(indent);
    let mut out = String::new();
    for (property, value) in styles {
        if value.trim().is_empty() {
            continue;
        }
        let flag = if important { " !important" } else { "" };
        out.push_str(&format!("\n{pad}{}: {value}{flag};", property.to_kebab_case()));
    }
    out
}

/// Selector addressing `el` in its own style rules.
pub fn selector(el: &Element, options: &CompileOptions) -> String {
    if options.email_mode {
        format!(".{}-subject", el.id)
    } else {
        format!(".builder-block.{}", el.id)
    }
}

/// Base rule plus media queries for one block.
///
/// In email mode the base rule is left out and media query declarations
/// are marked `!important`.
pub fn block_css(el: &Element, options: &CompileOptions) -> String {
    let selector = selector(el, options);
    let mut css = String::new();

    if !options.email_mode {
        let base = el
            .styles(Size::Large)
            .map(|styles| declarations(styles, BASE_INDENT, false))
            .unwrap_or_default();
        css.push_str(&format!("{selector} {{{base}}}"));
    }

    for size in Size::ALL.into_iter().rev() {
        if matches!(size, Size::Large | Size::XSmall) {
            continue;
        }
        let Some(styles) = el.styles(size).filter(|styles| !styles.is_empty()) else {
            continue;
        };
        let body = declarations(styles, MEDIA_INDENT, options.email_mode);
        css.push_str(&format!(
            "\n@media only screen and (max-width: {}px) {{ \n{selector} {{{body} }} }}",
            breakpoint(size).max,
        ));
    }

    css
}
