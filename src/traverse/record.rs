//! URL records and subtree builders.
//!
//! Two subtree shapes matter during traversal: `<url>` entries, which
//! become the records handed to the caller, and `<sitemap>` references,
//! which only ever feed the decision to open a nested document.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::reader::{truncated, NodeEvent, NodeKind, XmlNodeReader, XmlReadError};
use crate::traverse::filter::{lastmod_to_local, FilterPolicy};
use crate::traverse::value::{reduce_element, ElementValue};

/// One accepted sitemap URL entry.
///
/// Valid only until the next advance; the cursor hands out references,
/// clone if the record must outlive the current position.
#[derive(Debug, Clone, Serialize)]
pub struct UrlRecord {
    /// Absolute URL of the page; also the cursor key.
    pub loc: String,
    /// Explicit priority, if the entry carried one.
    pub priority: Option<f64>,
    /// Last modification time, converted to the local timezone.
    pub lastmod: Option<DateTime<Local>>,
    /// Change frequency hint, verbatim.
    pub changefreq: Option<String>,
    /// Everything else under `<url>`, keyed by local name.
    pub extensions: BTreeMap<String, ElementValue>,
}

/// A `<sitemap>` child of a sitemap index. Internal only.
#[derive(Debug, Default)]
pub(crate) struct SitemapReference {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
}

/// Consume a `<sitemap>` subtree, keeping only `loc` and `lastmod`.
///
/// Other children are skipped without reduction; nothing else is
/// meaningful at the index level.
pub(crate) fn read_sitemap_reference(
    reader: &mut XmlNodeReader,
    start: &NodeEvent,
) -> Result<SitemapReference, XmlReadError> {
    let mut reference = SitemapReference::default();
    loop {
        let event = reader.read()?.ok_or_else(|| truncated(&start.name))?;
        match event.kind {
            NodeKind::StartElement => match event.name.as_str() {
                "loc" => reference.loc = read_leaf_text(reader, &event)?,
                "lastmod" => reference.lastmod = read_leaf_text(reader, &event)?,
                _ => skip_subtree(reader, &event)?,
            },
            NodeKind::EndElement if event.depth == start.depth => break,
            _ => {}
        }
    }
    Ok(reference)
}

/// Consume a `<url>` subtree and build a record, applying the filters.
///
/// Returns `Ok(None)` when the entry is filtered out or malformed
/// (missing `loc`); both are skips, never errors.
pub(crate) fn build_url_record(
    reader: &mut XmlNodeReader,
    start: &NodeEvent,
    filter: &FilterPolicy,
) -> Result<Option<UrlRecord>, XmlReadError> {
    let mut loc: Option<String> = None;
    let mut lastmod: Option<String> = None;
    let mut priority_text: Option<String> = None;
    let mut extensions: BTreeMap<String, ElementValue> = BTreeMap::new();

    loop {
        let event = reader.read()?.ok_or_else(|| truncated(&start.name))?;
        match event.kind {
            NodeKind::StartElement => match event.name.as_str() {
                // Known simple fields bypass the generic reducer.
                "loc" => loc = read_leaf_text(reader, &event)?,
                "lastmod" => lastmod = read_leaf_text(reader, &event)?,
                "priority" => priority_text = read_leaf_text(reader, &event)?,
                _ => {
                    let name = event.name.clone();
                    let value = reduce_element(reader, &event)?;
                    extensions.insert(name, value);
                }
            },
            NodeKind::EndElement if event.depth == start.depth => break,
            _ => {}
        }
    }

    let Some(loc) = loc else {
        tracing::debug!("skipping <url> without <loc>");
        return Ok(None);
    };

    let priority = priority_text.as_deref().and_then(parse_priority);
    if filter.skip_by_priority(priority) || filter.skip_by_lastmod(lastmod.as_deref()) {
        return Ok(None);
    }

    let changefreq = match extensions.remove("changefreq") {
        Some(ElementValue::Text(s)) => Some(s),
        _ => None,
    };

    Ok(Some(UrlRecord {
        loc,
        priority,
        lastmod: lastmod.as_deref().and_then(lastmod_to_local),
        changefreq,
        extensions,
    }))
}

fn parse_priority(text: &str) -> Option<f64> {
    match text.trim().parse::<f64>() {
        Ok(p) => Some(p),
        Err(_) => {
            tracing::warn!(priority = text, "unparseable priority, treating as absent");
            None
        }
    }
}

/// Read the text of a leaf element, consuming through its end tag.
///
/// Nested elements inside a supposed leaf are consumed and ignored.
/// Empty text is normalized to `None`.
fn read_leaf_text(
    reader: &mut XmlNodeReader,
    start: &NodeEvent,
) -> Result<Option<String>, XmlReadError> {
    let mut text: Option<String> = None;
    loop {
        let event = reader.read()?.ok_or_else(|| truncated(&start.name))?;
        match event.kind {
            NodeKind::Text => text = Some(event.value),
            NodeKind::EndElement if event.depth == start.depth => break,
            _ => {}
        }
    }
    Ok(text.filter(|t| !t.is_empty()))
}

/// Consume an element subtree without building anything.
fn skip_subtree(reader: &mut XmlNodeReader, start: &NodeEvent) -> Result<(), XmlReadError> {
    loop {
        let event = reader.read()?.ok_or_else(|| truncated(&start.name))?;
        if event.kind == NodeKind::EndElement && event.depth == start.depth {
            return Ok(());
        }
    }
}
