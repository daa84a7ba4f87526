//! Block nodes, the public output of parsing and input of serializing.

use crate::value::{AttributeValue, Attributes};

/// A parsed block.
///
/// Produced once per parse and never touched by the parser again. Callers
/// that edit a document build or clone nodes and hand them to
/// [`serialize`](crate::serialize).
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    /// Block type name, or the freeform name for literal markup
    pub block_type: String,

    /// Verbatim inner markup
    pub raw_content: String,

    /// Delimiter attributes merged with attributes extracted from markup
    pub attributes: Attributes,

    /// The type written in the document when the unknown-type handler
    /// stood in for it
    pub original_type: Option<String>,

    /// Literal markup found outside any block. Serialized verbatim, with no
    /// delimiter, whatever `block_type` says.
    pub freeform: bool,

    /// False when the block type's save function does not reproduce
    /// `raw_content` from `attributes`. Only registered, non-fallback blocks
    /// are checked; every other node is valid.
    pub is_valid: bool,
}

impl BlockNode {
    /// Create a node from a type and attributes
    pub fn new(block_type: &str, attributes: Attributes) -> Self {
        Self {
            block_type: block_type.to_string(),
            raw_content: String::new(),
            attributes,
            original_type: None,
            freeform: false,
            is_valid: true,
        }
    }

    /// Create a freeform node carrying literal markup
    pub fn freeform(freeform_name: &str, markup: &str) -> Self {
        Self {
            block_type: freeform_name.to_string(),
            raw_content: markup.to_string(),
            attributes: Attributes::new(),
            original_type: None,
            freeform: true,
            is_valid: true,
        }
    }

    /// Set the raw content
    pub fn with_content(mut self, raw_content: &str) -> Self {
        self.raw_content = raw_content.to_string();
        self
    }

    /// Set a single attribute
    pub fn with_attribute(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Look up an attribute
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// The type to write in the delimiter when serializing
    pub fn delimiter_type(&self) -> &str {
        self.original_type.as_deref().unwrap_or(&self.block_type)
    }
}
