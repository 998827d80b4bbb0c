//! WASM bindings for the builder liquid compiler.
//!
//! Exposes `compile()` to JavaScript via wasm-bindgen. Takes the content
//! object as JS receives it from the content API and returns `{ html }` or
//! `{ html, css }`.

use builder_content::size::{size_for_fractional_width, width_for_size as lookup_width};
use builder_content::{Document, Size};
use builder_liquid::{CompileOptions, CompiledOutput};
use wasm_bindgen::prelude::*;

/// Compile builder content to markup.
///
/// `options` may be `undefined` or a partial `{ emailMode, extractCss }`.
/// Throws a JS error if `content` does not have the shape of a document.
#[wasm_bindgen]
pub fn compile(content: JsValue, model_name: &str, options: JsValue) -> Result<JsValue, JsError> {
    let doc: Document = serde_wasm_bindgen::from_value(content)
        .map_err(|e| JsError::new(&format!("Invalid content: {e}")))?;
    let options = parse_options(options)?;

    let output = native_compile(&doc, model_name, &options);
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsError::new(&e.to_string()))
}

/// Breakpoint name (`xsmall`..`large`) for a viewport width.
#[wasm_bindgen(js_name = sizeForWidth)]
pub fn size_for_width(width: f64) -> String {
    size_for_fractional_width(width).to_string()
}

/// Representative width of a named breakpoint.
#[wasm_bindgen(js_name = widthForSize)]
pub fn width_for_size(size: &str) -> Result<u32, JsError> {
    let size: Size = size.parse()?;
    Ok(lookup_width(size))
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_options(options: JsValue) -> Result<CompileOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(CompileOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {e}")))
}

fn native_compile(doc: &Document, model_name: &str, options: &CompileOptions) -> CompiledOutput {
    builder_liquid::compile(doc, model_name, options)
}
