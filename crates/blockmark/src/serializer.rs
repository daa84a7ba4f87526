//! Block serialization
//!
//! Converts block nodes back into a delimited document.

use blockmark_core::comment_delimited;

use crate::diff::{comment_attributes, encode_attributes};
use crate::node::BlockNode;
use crate::options::Options;
use crate::registry::Registry;

/// Serialize blocks into a document string
pub fn serialize(blocks: &[BlockNode], registry: &Registry, _options: &Options) -> String {
    let capacity = blocks.iter().map(|b| b.raw_content.len() + 64).sum();
    let mut output = String::with_capacity(capacity);

    for block in blocks {
        write_block(block, registry, &mut output);
    }

    output
}

/// Serialize a single block
pub fn serialize_block(block: &BlockNode, registry: &Registry, _options: &Options) -> String {
    let mut output = String::new();
    write_block(block, registry, &mut output);
    output
}

fn write_block(block: &BlockNode, registry: &Registry, out: &mut String) {
    if block.freeform {
        out.push_str(&block.raw_content);
        return;
    }

    let block_type = registry.block_type(&block.block_type);
    if block_type.is_none() {
        tracing::trace!(
            block_type = block.delimiter_type(),
            "serializing unregistered block verbatim"
        );
    }

    // A node standing in for an unregistered type keeps its original markup;
    // the fallback schema only decides which attributes that markup already
    // carries.
    let markup = match (block_type, &block.original_type) {
        (Some(block_type), None) => block_type.save(&block.attributes),
        _ => block.raw_content.clone(),
    };
    let attributes = comment_attributes(&block.attributes, block_type, &markup);

    out.push_str(&comment_delimited(
        block.delimiter_type(),
        &encode_attributes(&attributes),
        &markup,
    ));
}
