//! Attribute merging: delimiter attributes plus attributes extracted from
//! the block's markup.

use blockmark_core::parse_attribute_text;

use crate::registry::{BlockType, Registry};
use crate::value::{AttributeValue, Attributes};

/// Find the block type for a delimiter.
///
/// Falls back once to the registry's unknown-type handler. `None` means no
/// schema applies and the block keeps only its delimiter attributes.
pub fn resolve_block_type<'r>(registry: &'r Registry, name: &str) -> Option<&'r BlockType> {
    if let Some(block_type) = registry.block_type(name) {
        return Some(block_type);
    }

    match registry.unknown_type_handler_name() {
        Some(fallback) => {
            let block_type = registry.block_type(fallback);
            if block_type.is_none() {
                tracing::debug!(
                    block_type = name,
                    fallback,
                    "unknown-type handler is not registered"
                );
            } else {
                tracing::debug!(block_type = name, fallback, "unknown block type, using handler");
            }
            block_type
        }
        None => {
            tracing::debug!(block_type = name, "unknown block type");
            None
        }
    }
}

/// Merge delimiter attribute text with attributes extracted from content.
///
/// Delimiter values always win: extraction only runs for schema attributes
/// the delimiter did not supply. Extraction failures leave the attribute
/// absent unless the schema declares a default.
pub fn merge_attributes(
    raw_attributes: &str,
    raw_content: &str,
    block_type: Option<&BlockType>,
) -> Attributes {
    let mut attributes = Attributes::new();

    for (key, raw) in parse_attribute_text(raw_attributes) {
        let value = match block_type.and_then(|bt| bt.attribute_schema(key)) {
            Some(schema) => schema.from_delimiter(key, raw),
            None => AttributeValue::from(raw),
        };
        attributes.insert(key.to_string(), value);
    }

    let Some(block_type) = block_type else {
        return attributes;
    };

    for (name, schema) in block_type.attributes() {
        if attributes.contains_key(name) {
            continue;
        }
        if let Some(value) = schema.from_content(name, raw_content) {
            attributes.insert(name.clone(), value);
        }
    }

    attributes
}
