//! Block type registry.
//!
//! The registry owns every [`BlockType`]: its attribute schema and its save
//! function. Parsing and serializing borrow it for the length of one call,
//! so a registry can be shared between threads as a read-only snapshot.

use std::fmt;

use blockmark_core::is_valid_block_type;
use indexmap::IndexMap;

use crate::extract::Extractor;
use crate::value::{AttributeType, AttributeValue, Attributes};
use crate::{BlockError, Result};

/// Type alias for save functions
pub type SaveFn = Box<dyn Fn(&Attributes) -> String + Send + Sync>;

/// Schema of a single attribute
#[derive(Debug, Default)]
pub struct AttributeSchema {
    /// How to recover the value from markup, if it can be
    pub extractor: Option<Extractor>,
    /// Declared value type
    pub kind: Option<AttributeType>,
    /// Value used when nothing else provides one
    pub default: Option<AttributeValue>,
    /// Closed set of accepted values, if any
    pub allowed: Option<Vec<AttributeValue>>,
}

impl AttributeSchema {
    /// An attribute that only lives in the delimiter
    pub fn new() -> Self {
        Self::default()
    }

    /// An attribute of the given type that only lives in the delimiter
    pub fn of_type(kind: AttributeType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// An attribute recovered from markup by `extractor`
    pub fn sourced(extractor: impl Into<Extractor>) -> Self {
        Self {
            extractor: Some(extractor.into()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: AttributeType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_default(mut self, default: impl Into<AttributeValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict extracted values to `values`
    pub fn with_allowed<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn accepts(&self, name: &str, value: &AttributeValue) -> bool {
        if let Some(kind) = self.kind {
            if !kind.matches(value) {
                tracing::trace!(attribute = name, ?kind, "extracted value has the wrong type");
                return false;
            }
        }
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(value) {
                tracing::trace!(attribute = name, %value, "extracted value is not allowed");
                return false;
            }
        }
        true
    }

    /// The value this attribute takes from `content` alone.
    ///
    /// Runs the extractor, discards a value of the wrong type or outside
    /// the allowed set, and falls back to the default.
    pub fn from_content(&self, name: &str, content: &str) -> Option<AttributeValue> {
        let extracted = self
            .extractor
            .as_ref()
            .and_then(|extractor| extractor.extract(content))
            .filter(|value| self.accepts(name, value));

        if extracted.is_none() && self.extractor.is_some() {
            tracing::trace!(attribute = name, "attribute not recoverable from content");
        }

        extracted.or_else(|| self.default.clone())
    }

    /// Read a delimiter token for this attribute.
    ///
    /// A token that does not coerce to the declared type is kept as a
    /// string.
    pub fn from_delimiter(&self, name: &str, raw: &str) -> AttributeValue {
        match self.kind {
            Some(kind) => kind.coerce(raw).unwrap_or_else(|| {
                tracing::debug!(attribute = name, value = raw, ?kind, "delimiter value kept as string");
                AttributeValue::from(raw)
            }),
            None => AttributeValue::from(raw),
        }
    }
}

impl From<Extractor> for AttributeSchema {
    fn from(extractor: Extractor) -> Self {
        Self::sourced(extractor)
    }
}

/// A registered block type
pub struct BlockType {
    name: String,
    attributes: IndexMap<String, AttributeSchema>,
    save: SaveFn,
}

impl BlockType {
    /// Create a block type with no attributes
    pub fn new<F>(name: &str, save: F) -> Self
    where
        F: Fn(&Attributes) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            attributes: IndexMap::new(),
            save: Box::new(save),
        }
    }

    /// Declare an attribute. Declaration order is serialization order.
    pub fn attribute(mut self, name: &str, schema: impl Into<AttributeSchema>) -> Self {
        self.attributes.insert(name.to_string(), schema.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute schemas in declaration order
    pub fn attributes(&self) -> &IndexMap<String, AttributeSchema> {
        &self.attributes
    }

    pub fn attribute_schema(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    /// Render markup for `attributes`
    pub fn save(&self, attributes: &Attributes) -> String {
        (self.save)(attributes)
    }
}

impl fmt::Debug for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockType")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Collection of block types plus the unknown-type policy
#[derive(Debug, Default)]
pub struct Registry {
    block_types: IndexMap<String, BlockType>,
    unknown_type_handler: Option<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block type.
    ///
    /// Fails if the name is not `namespace/name` or is already taken.
    pub fn register(&mut self, block_type: BlockType) -> Result<()> {
        let name = block_type.name().to_string();
        if !name.contains('/') || !is_valid_block_type(&name) {
            return Err(BlockError::InvalidName(name));
        }
        if self.block_types.contains_key(&name) {
            return Err(BlockError::AlreadyRegistered(name));
        }

        tracing::debug!(block_type = %name, "registered block type");
        self.block_types.insert(name, block_type);
        Ok(())
    }

    /// Remove a block type, returning it if it was registered
    pub fn unregister(&mut self, name: &str) -> Option<BlockType> {
        self.block_types.shift_remove(name)
    }

    pub fn block_type(&self, name: &str) -> Option<&BlockType> {
        self.block_types.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.block_types.contains_key(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.block_types.keys().map(String::as_str)
    }

    /// Set the block type used for delimiters of unregistered types
    pub fn set_unknown_type_handler_name(&mut self, name: Option<String>) {
        self.unknown_type_handler = name;
    }

    pub fn unknown_type_handler_name(&self) -> Option<&str> {
        self.unknown_type_handler.as_deref()
    }
}
