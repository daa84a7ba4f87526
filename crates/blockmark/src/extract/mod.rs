//! Attribute extraction rules.
//!
//! An extractor computes one attribute's value from a block's inner markup.
//! It is either an arbitrary function or, with the `html` feature, a
//! declarative [`Matcher`] evaluated against the parsed fragment.

#[cfg(feature = "html")]
mod matcher;

#[cfg(feature = "html")]
pub use matcher::Matcher;

use std::fmt;

use crate::value::AttributeValue;

/// Type alias for extraction functions
pub type ExtractFn = Box<dyn Fn(&str) -> Option<AttributeValue> + Send + Sync>;

/// A rule computing an attribute value from raw block content
pub enum Extractor {
    /// Compute the value with a function of the raw content
    Function(ExtractFn),
    /// Query the raw content as an HTML fragment
    #[cfg(feature = "html")]
    Selector(Matcher),
}

impl Extractor {
    /// Create an extractor from a function
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<AttributeValue> + Send + Sync + 'static,
    {
        Extractor::Function(Box::new(f))
    }

    /// Run the extractor. `None` means the attribute is absent.
    pub fn extract(&self, content: &str) -> Option<AttributeValue> {
        match self {
            Extractor::Function(f) => f(content),
            #[cfg(feature = "html")]
            Extractor::Selector(matcher) => matcher.evaluate(content),
        }
    }
}

#[cfg(feature = "html")]
impl From<Matcher> for Extractor {
    fn from(matcher: Matcher) -> Self {
        Extractor::Selector(matcher)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::Function(_) => f.write_str("Function(..)"),
            #[cfg(feature = "html")]
            Extractor::Selector(matcher) => f.debug_tuple("Selector").field(matcher).finish(),
        }
    }
}
