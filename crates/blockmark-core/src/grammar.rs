//! Block delimiter grammar
//!
//! Splits a document into literal spans and outermost block tokens. The
//! grammar is total: every byte of the input ends up in exactly one span,
//! and malformed or unbalanced delimiters simply stay literal text.

use std::collections::HashMap;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a single block comment delimiter (opener, closer or void).
///
/// Attribute text may not contain `<` or `>`, so an opener missing its
/// `-->` cannot run on into the following markup.
static DELIMITER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"<!--\s+(?P<closer>/)?wp:(?P<name>[a-z][a-z0-9-]*(?:/[a-z][a-z0-9-]*)?)(?:\s+(?P<attrs>[^<>]*?))?\s*(?P<void>/)?-->",
    )
    .expect("delimiter pattern is valid")
});

static BLOCK_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*(?:/[a-z][a-z0-9-]*)?$").expect("block type pattern is valid")
});

/// Check whether `name` is a block type identifier the grammar recognizes
pub fn is_valid_block_type(name: &str) -> bool {
    BLOCK_TYPE.is_match(name)
}

/// A block found by the grammar, borrowing from the source document.
///
/// `opener`, `raw_content` and `closer` concatenated reproduce the token's
/// span of the document byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlockToken<'a> {
    /// Namespaced block type, e.g. `core/paragraph`
    pub block_type: &'a str,
    /// Attribute text between the type and the closing marker, trimmed
    pub raw_attributes: &'a str,
    /// Markup between opener and closer, empty for void tokens
    pub raw_content: &'a str,
    /// True for the self-closing `/-->` form
    pub is_void: bool,
    /// The opening (or void) delimiter as written
    pub opener: &'a str,
    /// The closing delimiter as written, `None` for void tokens
    pub closer: Option<&'a str>,
}

/// One piece of a tokenized document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    /// Markup outside any recognized block
    Literal(&'a str),
    /// An outermost block
    Block(RawBlockToken<'a>),
}

impl Span<'_> {
    /// Append the exact source text of this span to `out`
    pub fn push_source(&self, out: &mut String) {
        match self {
            Span::Literal(text) => out.push_str(text),
            Span::Block(token) => {
                out.push_str(token.opener);
                out.push_str(token.raw_content);
                if let Some(closer) = token.closer {
                    out.push_str(closer);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Opener,
    Closer,
    Void,
}

#[derive(Debug)]
struct Delimiter<'a> {
    kind: Kind,
    name: &'a str,
    attrs: &'a str,
    range: Range<usize>,
}

/// Tokenize a document into literal spans and outermost block tokens.
///
/// Closers match the most recently opened, still-unclosed opener of the
/// same type. Openers stacked above the matched one are abandoned and stay
/// inside the enclosing block's content. Nested blocks are not descended
/// into; callers re-tokenize `raw_content` if they need them.
pub fn tokenize(document: &str) -> Vec<Span<'_>> {
    let delimiters = scan(document);
    let closer_of = pair(&delimiters);

    let mut spans = Vec::new();
    let mut cursor = 0;

    for (i, delimiter) in delimiters.iter().enumerate() {
        if delimiter.range.start < cursor {
            continue;
        }

        let (token, end) = match (delimiter.kind, closer_of[i]) {
            (Kind::Void, _) => {
                let end = delimiter.range.end;
                let token = RawBlockToken {
                    block_type: delimiter.name,
                    raw_attributes: delimiter.attrs,
                    raw_content: "",
                    is_void: true,
                    opener: &document[delimiter.range.clone()],
                    closer: None,
                };
                (token, end)
            }
            (Kind::Opener, Some(c)) => {
                let closer = &delimiters[c];
                let token = RawBlockToken {
                    block_type: delimiter.name,
                    raw_attributes: delimiter.attrs,
                    raw_content: &document[delimiter.range.end..closer.range.start],
                    is_void: false,
                    opener: &document[delimiter.range.clone()],
                    closer: Some(&document[closer.range.clone()]),
                };
                (token, closer.range.end)
            }
            _ => continue,
        };

        push_literal(&mut spans, &document[cursor..delimiter.range.start]);
        spans.push(Span::Block(token));
        cursor = end;
    }

    push_literal(&mut spans, &document[cursor..]);
    spans
}

fn push_literal<'a>(spans: &mut Vec<Span<'a>>, text: &'a str) {
    if !text.is_empty() {
        spans.push(Span::Literal(text));
    }
}

/// Find every delimiter in document order
fn scan(document: &str) -> Vec<Delimiter<'_>> {
    DELIMITER
        .captures_iter(document)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.name("name")?.as_str();
            let attrs = caps.name("attrs").map_or("", |m| m.as_str().trim());
            let kind = if caps.name("closer").is_some() {
                Kind::Closer
            } else if caps.name("void").is_some() {
                Kind::Void
            } else {
                Kind::Opener
            };

            Some(Delimiter {
                kind,
                name,
                attrs,
                range: whole.range(),
            })
        })
        .collect()
}

/// Match closers to openers, returning the closer index for each opener.
///
/// Keeps a per-type index of stack depths so each closer finds its opener
/// without walking the stack; every opener is pushed and popped at most
/// once.
fn pair(delimiters: &[Delimiter<'_>]) -> Vec<Option<usize>> {
    let mut closer_of = vec![None; delimiters.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut depths: HashMap<&str, Vec<usize>> = HashMap::new();

    for (i, delimiter) in delimiters.iter().enumerate() {
        match delimiter.kind {
            Kind::Opener => {
                depths.entry(delimiter.name).or_default().push(stack.len());
                stack.push(i);
            }
            Kind::Closer => {
                let Some(depth) = depths.get(delimiter.name).and_then(|d| d.last().copied())
                else {
                    tracing::trace!(
                        block_type = delimiter.name,
                        offset = delimiter.range.start,
                        "closing delimiter without an open block"
                    );
                    continue;
                };

                let opener = stack[depth];
                for abandoned in stack.drain(depth..) {
                    let name = delimiters[abandoned].name;
                    if let Some(d) = depths.get_mut(name) {
                        d.pop();
                    }
                    if abandoned != opener {
                        tracing::trace!(
                            block_type = name,
                            offset = delimiters[abandoned].range.start,
                            "opening delimiter left unclosed inside another block"
                        );
                    }
                }
                closer_of[opener] = Some(i);
            }
            Kind::Void => {}
        }
    }

    closer_of
}
