//! Declarative selector matchers.
//!
//! A [`Matcher`] describes where in a block's markup an attribute lives,
//! using CSS selectors. Content is parsed as an HTML fragment with
//! scraper/html5ever and the first element matching the selector is read.
//! A missing selector means the whole fragment for text and HTML, and the
//! fragment's first element for tags and HTML attributes.

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};

use crate::value::AttributeValue;

/// Declarative description of an attribute's location in markup
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Text content of the first match
    Text { selector: Option<String> },
    /// Inner HTML of the first match
    Html { selector: Option<String> },
    /// An HTML attribute of the first match
    Attribute {
        selector: Option<String>,
        attribute: String,
    },
    /// Lower-cased element name of the first match
    Tag { selector: Option<String> },
    /// For every match, a map of nested matchers evaluated within it
    Query {
        selector: String,
        fields: IndexMap<String, Matcher>,
    },
}

impl Matcher {
    pub fn text(selector: &str) -> Self {
        Matcher::Text {
            selector: Some(selector.to_string()),
        }
    }

    /// Text content of the whole fragment
    pub fn whole_text() -> Self {
        Matcher::Text { selector: None }
    }

    pub fn html(selector: &str) -> Self {
        Matcher::Html {
            selector: Some(selector.to_string()),
        }
    }

    /// Inner HTML of the whole fragment
    pub fn whole_html() -> Self {
        Matcher::Html { selector: None }
    }

    pub fn attribute(selector: &str, attribute: &str) -> Self {
        Matcher::Attribute {
            selector: Some(selector.to_string()),
            attribute: attribute.to_string(),
        }
    }

    pub fn tag(selector: &str) -> Self {
        Matcher::Tag {
            selector: Some(selector.to_string()),
        }
    }

    pub fn query<I, K>(selector: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Matcher)>,
        K: Into<String>,
    {
        Matcher::Query {
            selector: selector.to_string(),
            fields: fields.into_iter().map(|(k, m)| (k.into(), m)).collect(),
        }
    }

    /// Evaluate against raw block content
    pub fn evaluate(&self, content: &str) -> Option<AttributeValue> {
        let fragment = Html::parse_fragment(content);
        let root = fragment.root_element();

        match self {
            // The fragment root is the parser's synthetic `<html>` wrapper
            Matcher::Tag { selector: None } | Matcher::Attribute { selector: None, .. } => {
                let first = root.children().find_map(ElementRef::wrap)?;
                self.evaluate_in(first)
            }
            _ => self.evaluate_in(root),
        }
    }

    fn evaluate_in(&self, scope: ElementRef<'_>) -> Option<AttributeValue> {
        match self {
            Matcher::Text { selector } => {
                let element = first_match(scope, selector.as_deref())?;
                Some(AttributeValue::String(element.text().collect()))
            }
            Matcher::Html { selector } => {
                let element = first_match(scope, selector.as_deref())?;
                Some(AttributeValue::String(element.inner_html()))
            }
            Matcher::Attribute {
                selector,
                attribute,
            } => {
                let element = first_match(scope, selector.as_deref())?;
                element.value().attr(attribute).map(AttributeValue::from)
            }
            Matcher::Tag { selector } => {
                let element = first_match(scope, selector.as_deref())?;
                Some(AttributeValue::String(element.value().name().to_lowercase()))
            }
            Matcher::Query { selector, fields } => {
                let selector = parse_selector(selector)?;
                let items = scope
                    .select(&selector)
                    .map(|element| {
                        let entry = fields
                            .iter()
                            .filter_map(|(key, matcher)| {
                                matcher.evaluate_in(element).map(|v| (key.clone(), v))
                            })
                            .collect();
                        AttributeValue::Map(entry)
                    })
                    .collect();
                Some(AttributeValue::List(items))
            }
        }
    }
}

fn first_match<'a>(scope: ElementRef<'a>, selector: Option<&str>) -> Option<ElementRef<'a>> {
    match selector {
        None => Some(scope),
        Some(selector) => {
            let selector = parse_selector(selector)?;
            let found = scope.select(&selector).next();
            found
        }
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(selector, error = ?err, "invalid attribute selector");
            None
        }
    }
}
