//! Document parsing: grammar plus attribute merging.

use blockmark_core::{tokenize, RawBlockToken, Span};

use crate::merge::{merge_attributes, resolve_block_type};
use crate::node::BlockNode;
use crate::options::Options;
use crate::registry::{BlockType, Registry};

/// Parse a document into block nodes.
///
/// Every part of the document is accounted for: markup outside blocks
/// becomes freeform nodes, unknown types keep their delimiter attributes,
/// and malformed delimiters are treated as markup. Never fails.
pub fn parse(document: &str, registry: &Registry, options: &Options) -> Vec<BlockNode> {
    let spans = tokenize(document);
    let mut blocks = Vec::with_capacity(spans.len());

    for span in spans {
        match span {
            Span::Literal(text) => {
                if options.skip_blank_freeform && text.trim().is_empty() {
                    continue;
                }
                blocks.push(BlockNode::freeform(&options.freeform_name, text));
            }
            Span::Block(token) => blocks.push(parse_block(&token, registry)),
        }
    }

    tracing::trace!(blocks = blocks.len(), "parsed document");
    blocks
}

/// Turn a single raw token into a block node
pub fn parse_block(token: &RawBlockToken<'_>, registry: &Registry) -> BlockNode {
    let block_type = resolve_block_type(registry, token.block_type);
    let attributes = merge_attributes(token.raw_attributes, token.raw_content, block_type);
    let mut node = BlockNode::new(token.block_type, attributes).with_content(token.raw_content);

    match block_type {
        Some(resolved) if resolved.name() != token.block_type => {
            node.block_type = resolved.name().to_string();
            node.original_type = Some(token.block_type.to_string());
        }
        Some(resolved) => node.is_valid = matches_saved_markup(resolved, &node),
        None => {}
    }

    node
}

/// Whether `save` reproduces the markup the block was parsed from.
///
/// Surrounding whitespace is ignored on both sides.
fn matches_saved_markup(block_type: &BlockType, node: &BlockNode) -> bool {
    let saved = block_type.save(&node.attributes);
    let valid = saved.trim() == node.raw_content.trim();
    if !valid {
        tracing::debug!(
            block_type = block_type.name(),
            expected = %saved,
            actual = %node.raw_content,
            "block content does not match saved markup"
        );
    }
    valid
}
