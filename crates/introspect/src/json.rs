//! Pass-through formatting of raw introspection JSON.
//!
//! Both helpers keep object keys in their original order.

use crate::{IntrospectionError, Result};

fn parse_value(raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw).map_err(|e| IntrospectionError::parse(raw, &e))
}

/// Re-indents a JSON document with two spaces per level.
pub fn pretty_json(raw: &str) -> Result<String> {
    let value = parse_value(raw)?;
    serde_json::to_string_pretty(&value).map_err(|e| IntrospectionError::parse(raw, &e))
}

/// Removes all insignificant whitespace from a JSON document.
pub fn compact_json(raw: &str) -> Result<String> {
    let value = parse_value(raw)?;
    serde_json::to_string(&value).map_err(|e| IntrospectionError::parse(raw, &e))
}
