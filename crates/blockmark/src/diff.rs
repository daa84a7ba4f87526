//! Attribute diffing: which attributes must go into the delimiter.
//!
//! An attribute is written to the delimiter only if re-parsing the saved
//! markup would not reproduce it. This is the inverse of the merge rule
//! that lets delimiter values override extracted ones.

use blockmark_core::AttributeTextWriter;

use crate::registry::BlockType;
use crate::value::Attributes;

/// Select the attributes the delimiter must carry.
///
/// Schema attributes come first in declaration order and are kept when the
/// value recomputed from `markup` is missing or different. Attributes with
/// no schema entry follow in their own order and are always kept. Without a
/// block type every attribute is kept.
pub fn comment_attributes(
    attributes: &Attributes,
    block_type: Option<&BlockType>,
    markup: &str,
) -> Attributes {
    let Some(block_type) = block_type else {
        return attributes.clone();
    };

    let mut kept = Attributes::new();

    for (name, schema) in block_type.attributes() {
        let Some(value) = attributes.get(name) else {
            continue;
        };
        if schema.from_content(name, markup).as_ref() != Some(value) {
            kept.insert(name.clone(), value.clone());
        }
    }

    for (name, value) in attributes {
        if block_type.attribute_schema(name).is_none() {
            kept.insert(name.clone(), value.clone());
        }
    }

    kept
}

/// Encode attributes as delimiter attribute text (`key:value ` pairs).
///
/// Pairs containing `<` or `>` would end or hide the delimiter and are
/// skipped. Other values the grammar cannot read back unchanged (empty, or
/// containing whitespace) are written anyway.
pub fn encode_attributes(attributes: &Attributes) -> String {
    let mut writer = AttributeTextWriter::new();

    for (name, value) in attributes {
        let text = value.to_attribute_text();
        if breaks_delimiter(name) || breaks_delimiter(&text) {
            tracing::warn!(
                attribute = %name,
                value = %text,
                "attribute would break the block delimiter, skipped"
            );
            continue;
        }
        if !is_bare_token(&text) {
            tracing::warn!(
                attribute = %name,
                value = %text,
                "attribute value cannot be read back from a delimiter"
            );
        }
        writer.push(name, &text);
    }

    writer.finish()
}

fn breaks_delimiter(text: &str) -> bool {
    text.contains(['<', '>'])
}

/// Values the grammar reads back unchanged: non-empty, no whitespace, no
/// angle brackets
fn is_bare_token(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
}
