//! Delimiter attribute text
//!
//! Attributes live in the opening delimiter as whitespace-separated
//! `key:value` pairs. Values are bare tokens: no quoting, no escaping, no
//! embedded whitespace.

/// Split attribute text into `(key, value)` pairs.
///
/// Each token is split on its first `:`, so values may themselves contain
/// colons (`href:https://example.com`). Tokens without a colon, with an
/// empty key or with an empty value are skipped. When a key repeats, the
/// last value wins and keeps the position of the first occurrence.
pub fn parse_attribute_text(text: &str) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = Vec::new();

    for token in text.split_whitespace() {
        let Some((key, value)) = token.split_once(':') else {
            tracing::trace!(token, "skipping attribute token without a colon");
            continue;
        };
        if key.is_empty() || value.is_empty() {
            tracing::trace!(token, "skipping attribute token with an empty side");
            continue;
        }

        match pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => pairs.push((key, value)),
        }
    }

    pairs
}

/// Builds delimiter attribute text, one `key:value ` pair at a time.
///
/// Every pair carries a trailing space, so the finished text can be placed
/// directly before `-->` or `/-->`.
#[derive(Debug, Default, Clone)]
pub struct AttributeTextWriter {
    out: String,
}

impl AttributeTextWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair
    pub fn push(&mut self, key: &str, value: &str) -> &mut Self {
        self.out.push_str(key);
        self.out.push(':');
        self.out.push_str(value);
        self.out.push(' ');
        self
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn finish(self) -> String {
        self.out
    }
}
