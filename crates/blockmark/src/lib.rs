//! # blockmark
//!
//! Parse and serialize block documents: HTML interleaved with comment
//! delimiters that mark each block's type and a few inline attributes.
//!
//! ```text
//! <!-- wp:core/test-block align:left --><p>Ribs & Chicken</p><!-- /wp:core/test-block -->
//! ```
//!
//! ## Design
//!
//! Parsing merges the attributes written in the delimiter with attributes
//! recovered from the block's markup by the block type's extractors.
//! Serializing renders markup with the block type's save function and writes
//! into the delimiter only what that markup cannot reproduce, so that
//! `parse(serialize(blocks))` gives back the same attributes.
//!
//! Both directions are total. Unknown block types, unbalanced delimiters and
//! arbitrary HTML degrade to best-effort results and never to errors; markup
//! outside blocks is kept as freeform nodes. A registered block whose markup
//! differs from what its save function renders is still parsed, with
//! `is_valid` cleared.
//!
//! The [`Registry`] is passed into every call. Parsing and serializing hold
//! no state of their own and can run concurrently over a shared registry.
//!
//! ## Example
//!
//! ```rust
//! use blockmark::{parse, serialize, AttributeValue, BlockType, Extractor, Options, Registry};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         BlockType::new("core/test-block", |attrs| {
//!             let content = attrs.get("content").and_then(AttributeValue::as_str);
//!             format!("<p>{}</p>", content.unwrap_or_default())
//!         })
//!         .attribute(
//!             "content",
//!             Extractor::function(|markup| {
//!                 markup
//!                     .strip_prefix("<p>")
//!                     .and_then(|s| s.strip_suffix("</p>"))
//!                     .map(AttributeValue::from)
//!             }),
//!         ),
//!     )
//!     .unwrap();
//!
//! let options = Options::default();
//! let doc = "<!-- wp:core/test-block align:left --><p>Ribs</p><!-- /wp:core/test-block -->";
//!
//! let blocks = parse(doc, &registry, &options);
//! assert_eq!(blocks[0].attribute("content"), Some(&"Ribs".into()));
//! assert_eq!(blocks[0].attribute("align"), Some(&"left".into()));
//!
//! assert_eq!(serialize(&blocks, &registry, &options), doc);
//! ```

mod diff;
mod extract;
mod merge;
pub mod node;
mod options;
mod parser;
mod registry;
mod serializer;
mod value;

pub use blockmark_core::{tokenize, RawBlockToken, Span};
pub use diff::{comment_attributes, encode_attributes};
#[cfg(feature = "html")]
pub use extract::Matcher;
pub use extract::{ExtractFn, Extractor};
pub use merge::{merge_attributes, resolve_block_type};
pub use node::BlockNode;
pub use options::{Options, DEFAULT_FREEFORM_NAME};
pub use parser::{parse, parse_block};
pub use registry::{AttributeSchema, BlockType, Registry, SaveFn};
pub use serializer::{serialize, serialize_block};
pub use value::{AttributeType, AttributeValue, Attributes};

/// Error type for registry operations
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("Invalid block name: {0:?} (expected namespace/name)")]
    InvalidName(String),

    #[error("Block type already registered: {0}")]
    AlreadyRegistered(String),
}

pub type Result<T> = std::result::Result<T, BlockError>;
