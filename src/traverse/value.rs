//! Generic element-to-value reduction.
//!
//! Extension elements under `<url>` (image, video, news, anything outside
//! the fixed sitemap vocabulary) are captured generically: an element
//! reduces to its text, to a map of its children, or to nothing.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::reader::{truncated, NodeEvent, NodeKind, XmlNodeReader, XmlReadError};

/// The reduced value of one element subtree.
///
/// Serializes as a string, a JSON object, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementValue {
    /// Empty element, or element whose text was empty.
    Absent,
    /// Text-only element.
    Text(String),
    /// Element with child elements, keyed by local name.
    ///
    /// Duplicate local names overwrite: last write wins. Multi-namespace
    /// extensions that collapse to the same local name lose all but the
    /// final occurrence. Carried over from the original behavior; callers
    /// needing every occurrence must not rely on this reducer.
    Map(BTreeMap<String, ElementValue>),
}

impl ElementValue {
    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ElementValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The child map, if this is a map value.
    pub fn as_map(&self) -> Option<&BTreeMap<String, ElementValue>> {
        match self {
            ElementValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Reduce the element whose start event was just read.
///
/// Consumes every event up to and including the matching end tag, leaving
/// the reader positioned after the subtree.
pub fn reduce_element(
    reader: &mut XmlNodeReader,
    start: &NodeEvent,
) -> Result<ElementValue, XmlReadError> {
    let mut text: Option<String> = None;
    let mut children: BTreeMap<String, ElementValue> = BTreeMap::new();

    loop {
        let event = reader
            .read()?
            .ok_or_else(|| truncated(&start.name))?;
        match event.kind {
            NodeKind::StartElement => {
                let name = event.name.clone();
                let value = reduce_element(reader, &event)?;
                children.insert(name, value);
            }
            NodeKind::Text => text = Some(event.value),
            NodeKind::EndElement if event.depth == start.depth => break,
            NodeKind::EndElement => {}
        }
    }

    if !children.is_empty() {
        return Ok(ElementValue::Map(children));
    }
    match text {
        Some(t) if !t.is_empty() => Ok(ElementValue::Text(t)),
        _ => Ok(ElementValue::Absent),
    }
}
