//! Export adapters: pure conversions from a [`TokenSet`] into the two
//! external representations (design-tool JSON and a CSS custom-property
//! stylesheet), plus the raw pretty-printed form used for clipboard copy.

use crate::tokens::TokenSet;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Scalar categories in export order. Illustrations are a sequence, not a
/// mapping, and are excluded from both adapters.
fn scalar_categories(tokens: &TokenSet) -> [(&'static str, &BTreeMap<String, String>); 4] {
    [
        ("color", &tokens.color),
        ("font", &tokens.font),
        ("spacing", &tokens.spacing),
        ("radius", &tokens.radius),
    ]
}

/// Nested design-tool format: `{category: {key: {"value": v}}}`.
pub fn to_nested_format(tokens: &TokenSet) -> Value {
    let mut root = Map::new();
    for (category, entries) in scalar_categories(tokens) {
        let mut category_map = Map::new();
        for (key, value) in entries {
            category_map.insert(key.clone(), json!({ "value": value }));
        }
        root.insert(category.to_string(), Value::Object(category_map));
    }
    Value::Object(root)
}

/// CSS custom properties, one `--{category}-{key}: {value};` line per
/// scalar entry, wrapped in a `:root` block.
pub fn to_stylesheet(tokens: &TokenSet) -> String {
    let mut css = String::from(":root {\n");
    for (category, entries) in scalar_categories(tokens) {
        for (key, value) in entries {
            css.push_str(&format!("  --{category}-{key}: {value};\n"));
        }
    }
    css.push_str("}\n");
    css
}

/// The raw TokenSet, pretty-printed — what the original client placed on
/// the clipboard.
pub fn to_raw_json(tokens: &TokenSet) -> String {
    serde_json::to_string_pretty(tokens).unwrap_or_else(|_| "{}".to_string())
}
