//! Attribute synthesis.
//!
//! Values are written as-is between double quotes. Nothing is escaped, so a
//! value containing `"` breaks out of its attribute; callers must not pass
//! untrusted text through here.

use builder_content::PropertyMap;

/// Serialize `map` as ` key="value"` pairs in insertion order.
///
/// Returns an empty string for an empty map. A `None` value is written as
/// the literal `null`.
pub fn attributes(map: &PropertyMap) -> String {
    let mut out = String::new();
    for (key, value) in map {
        let value = value.as_deref().unwrap_or("null");
        out.push_str(&format!(" {key}=\"{value}\""));
    }
    out
}
