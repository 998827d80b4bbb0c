//! Block tree types.
//!
//! Field names follow the builder's JSON (`tagName`, `responsiveStyles`,
//! `modelName`). Keys the compiler has no use for (`@type`, `component`,
//! `bindings`, ...) are ignored on load. Attribute and style maps keep
//! their insertion order, since markup is emitted in that order.
//!
//! Loading is forgiving below the document level: a block that fails to
//! load is dropped on its own, keeping its siblings and the rest of the tree.

use crate::size::Size;
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// CSS property name (camel-case) to value.
pub type StyleMap = IndexMap<String, String>;

/// HTML attribute name to value. A `null` value is kept as `None`.
pub type PropertyMap = IndexMap<String, Option<String>>;

/// A builder document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContentData>,
}

/// The `data` payload of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentData {
    /// Top-level blocks. Anything other than an array loads as `None`;
    /// entries of the array that are not elements are dropped.
    #[serde(
        default,
        deserialize_with = "lenient_blocks",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocks: Option<Vec<Element>>,
}

/// One node of the block tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive_styles: Option<ResponsiveStyles>,
}

/// Style maps keyed by breakpoint. `large` is the base style.
///
/// Style values may be given as numbers or booleans and are kept as their
/// text. `null` and nested values are dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponsiveStyles {
    #[serde(
        default,
        deserialize_with = "lenient_styles",
        skip_serializing_if = "Option::is_none"
    )]
    pub large: Option<StyleMap>,
    #[serde(
        default,
        deserialize_with = "lenient_styles",
        skip_serializing_if = "Option::is_none"
    )]
    pub medium: Option<StyleMap>,
    #[serde(
        default,
        deserialize_with = "lenient_styles",
        skip_serializing_if = "Option::is_none"
    )]
    pub small: Option<StyleMap>,
    #[serde(
        default,
        deserialize_with = "lenient_styles",
        skip_serializing_if = "Option::is_none"
    )]
    pub xsmall: Option<StyleMap>,
}

impl ResponsiveStyles {
    pub fn get(&self, size: Size) -> Option<&StyleMap> {
        self.slot(size).as_ref()
    }

    /// The style map for `size`, created empty if absent.
    pub fn entry(&mut self, size: Size) -> &mut StyleMap {
        self.slot_mut(size).get_or_insert_with(StyleMap::new)
    }

    fn slot(&self, size: Size) -> &Option<StyleMap> {
        match size {
            Size::Large => &self.large,
            Size::Medium => &self.medium,
            Size::Small => &self.small,
            Size::XSmall => &self.xsmall,
        }
    }

    fn slot_mut(&mut self, size: Size) -> &mut Option<StyleMap> {
        match size {
            Size::Large => &mut self.large,
            Size::Medium => &mut self.medium,
            Size::Small => &mut self.small,
            Size::XSmall => &mut self.xsmall,
        }
    }
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<Element>) -> Self {
        self.data = Some(ContentData {
            blocks: Some(blocks),
        });
        self
    }

    /// Top-level blocks, empty when `data` or `data.blocks` is absent.
    pub fn blocks(&self) -> &[Element] {
        self.data
            .as_ref()
            .and_then(|data| data.blocks.as_deref())
            .unwrap_or(&[])
    }
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), Some(value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_style(
        mut self,
        size: Size,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.responsive_styles
            .get_or_insert_with(ResponsiveStyles::default)
            .entry(size)
            .insert(property.into(), value.into());
        self
    }

    /// Styles for `size`, if any were declared.
    pub fn styles(&self, size: Size) -> Option<&StyleMap> {
        self.responsive_styles.as_ref()?.get(size)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of an element list: an element, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum ElementEntry {
    Element(Element),
    Skipped(IgnoredAny),
}

fn keep_elements(entries: Vec<ElementEntry>) -> Vec<Element> {
    let total = entries.len();
    let elements: Vec<Element> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            ElementEntry::Element(el) => Some(el),
            ElementEntry::Skipped(_) => None,
        })
        .collect();
    if elements.len() < total {
        warn!(
            skipped = total - elements.len(),
            kept = elements.len(),
            "dropped malformed blocks"
        );
    }
    elements
}

fn lenient_blocks<'de, D>(deserializer: D) -> Result<Option<Vec<Element>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Blocks {
        List(Vec<ElementEntry>),
        Other(IgnoredAny),
    }

    Ok(match Blocks::deserialize(deserializer)? {
        Blocks::List(entries) => Some(keep_elements(entries)),
        Blocks::Other(_) => {
            warn!("`blocks` is not a list, ignoring it");
            None
        }
    })
}

fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<ElementEntry>>::deserialize(deserializer)?;
    Ok(keep_elements(entries.unwrap_or_default()))
}

fn lenient_styles<'de, D>(deserializer: D) -> Result<Option<StyleMap>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StyleValue {
        Text(String),
        Number(f64),
        Flag(bool),
        Other(IgnoredAny),
    }

    let raw = Option::<IndexMap<String, StyleValue>>::deserialize(deserializer)?;
    Ok(raw.map(|styles| {
        styles
            .into_iter()
            .filter_map(|(property, value)| match value {
                StyleValue::Text(text) => Some((property, text)),
                StyleValue::Number(n) => Some((property, n.to_string())),
                StyleValue::Flag(b) => Some((property, b.to_string())),
                StyleValue::Other(_) => None,
            })
            .collect()
    }))
}
