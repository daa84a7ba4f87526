//! Delimiter emission
//!
//! Writes block comment delimiters. `attribute_text` is expected in the form
//! produced by [`AttributeTextWriter`](crate::AttributeTextWriter): either
//! empty or a run of `key:value ` pairs each ending in a space.

/// Write `<!-- wp:{block_type} {attribute_text}-->`
pub fn write_opening(block_type: &str, attribute_text: &str, out: &mut String) {
    write_head(block_type, attribute_text, out);
    out.push_str("-->");
}

/// Write `<!-- /wp:{block_type} -->`
pub fn write_closing(block_type: &str, out: &mut String) {
    out.push_str("<!-- /wp:");
    out.push_str(block_type);
    out.push_str(" -->");
}

/// Write `<!-- wp:{block_type} {attribute_text}/-->`
pub fn write_void(block_type: &str, attribute_text: &str, out: &mut String) {
    write_head(block_type, attribute_text, out);
    out.push_str("/-->");
}

fn write_head(block_type: &str, attribute_text: &str, out: &mut String) {
    out.push_str("<!-- wp:");
    out.push_str(block_type);
    out.push(' ');
    out.push_str(attribute_text);
}

/// Wrap `content` in delimiters for `block_type`.
///
/// Empty content produces the void form.
pub fn comment_delimited(block_type: &str, attribute_text: &str, content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2 * block_type.len() + 32);

    if content.is_empty() {
        write_void(block_type, attribute_text, &mut out);
    } else {
        write_opening(block_type, attribute_text, &mut out);
        out.push_str(content);
        write_closing(block_type, &mut out);
    }

    out
}
