//! blockmark-core - block comment delimiter grammar
//!
//! This crate knows the textual shape of a block document and nothing else:
//! where delimiters are, what they say, and how to write them back. It is
//! used by `blockmark`, which layers block type schemas, attribute
//! extraction and the diffing serializer on top.
//!
//! # Architecture
//!
//! ```text
//!                 ┌───────────┐    Span::Literal
//! Document ─────▶ │  grammar  │ ─▶ Span::Block(RawBlockToken) ─▶ blockmark
//!                 └───────────┘
//!                 ┌───────────┐
//! type + attrs ─▶ │ delimiter │ ─▶ <!-- wp:type key:value -->…<!-- /wp:type -->
//!                 └───────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use blockmark_core::{tokenize, Span};
//!
//! let doc = "<p>intro</p><!-- wp:core/quote align:left --><q>Hi</q><!-- /wp:core/quote -->";
//! let spans = tokenize(doc);
//!
//! assert_eq!(spans[0], Span::Literal("<p>intro</p>"));
//! match &spans[1] {
//!     Span::Block(token) => {
//!         assert_eq!(token.block_type, "core/quote");
//!         assert_eq!(token.raw_attributes, "align:left");
//!         assert_eq!(token.raw_content, "<q>Hi</q>");
//!     }
//!     other => panic!("expected a block, got {other:?}"),
//! }
//! ```

mod attributes;
mod delimiter;
mod grammar;

pub use attributes::{parse_attribute_text, AttributeTextWriter};
pub use delimiter::{comment_delimited, write_closing, write_opening, write_void};
pub use grammar::{is_valid_block_type, tokenize, RawBlockToken, Span};
