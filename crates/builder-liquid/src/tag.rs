//! Runtime tag markup.
//!
//! The client renderer picks up prerendered content from a
//! `<builder-component-element>` tag. These helpers build that tag around
//! compiled output, or an empty one when there is nothing prerendered.
//!
//! `options` is written as raw JSON between single quotes. It is not HTML
//! encoded, so a `'` anywhere in the options ends the attribute early.

use crate::CompiledOutput;
use serde_json::Value;

/// Attributes of the runtime tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuntimeTag {
    pub model: Option<String>,
    /// Falls back to the model name.
    pub key: Option<String>,
    /// Content fetch options, passed through to the client.
    pub options: Option<Value>,
    pub rev: Option<String>,
}

impl RuntimeTag {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    fn name_attribute(&self) -> String {
        match self.model.as_deref() {
            Some(model) if !model.is_empty() => format!(" name=\"{model}\""),
            _ => String::new(),
        }
    }
}

/// An empty tag asking the client to render `model` itself.
pub fn placeholder_tag(model: Option<&str>) -> String {
    let tag = RuntimeTag {
        model: model.map(str::to_string),
        ..RuntimeTag::default()
    };
    format!(
        "<builder-component-element prerender=\"false\"{}></builder-component-element>",
        tag.name_attribute()
    )
}

/// Wrap compiled output in a runtime tag.
///
/// Split output gets its CSS put back in front of the markup as a
/// `builder-styles` style tag.
pub fn runtime_tag(output: &CompiledOutput, tag: &RuntimeTag) -> String {
    let mut body = String::new();
    if let Some(css) = output.css().filter(|css| !css.is_empty()) {
        body.push_str(&format!("<style class=\"builder-styles\">{css}</style>"));
    }
    body.push_str(output.html());

    let key = tag
        .key
        .as_deref()
        .filter(|key| !key.is_empty())
        .or(tag.model.as_deref())
        .unwrap_or_default();
    let options = tag.options.as_ref().unwrap_or(&Value::Null);
    let rev = tag.rev.as_deref().unwrap_or_default();

    format!(
        "<builder-component-element key=\"{key}\" options='{options}' prerender=\"false\" rev=\"{rev}\"{}>{body}</builder-component-element>",
        tag.name_attribute()
    )
}
