//! Configuration options for parsing and serialization

/// Default block type for markup outside any block
pub const DEFAULT_FREEFORM_NAME: &str = "freeform";

/// Options shared by [`parse`](crate::parse) and
/// [`serialize`](crate::serialize)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Block type given to literal markup between blocks
    pub freeform_name: String,

    /// Drop literal spans that are only whitespace instead of producing
    /// freeform nodes for them
    pub skip_blank_freeform: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            freeform_name: DEFAULT_FREEFORM_NAME.to_string(),
            skip_blank_freeform: false,
        }
    }
}
