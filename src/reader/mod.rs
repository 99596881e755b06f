//! Streaming node-event reader over one XML source.
//!
//! [`XmlNodeReader`] adapts quick-xml's event stream into the flat node
//! sequence the traversal engine consumes: element starts, element ends,
//! and text, each with a local name and nesting depth. Empty elements
//! (`<loc/>`) are split into a start/end pair so callers see one uniform
//! shape. Every read is error-checked; a parse error aborts the stream.

pub mod decode;

use std::io::{self, BufReader, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use decode::{negotiate_encoding, DecodingReader};

/// How many bytes to sniff for BOM / XML declaration before parsing.
const PREFIX_LEN: usize = 1024;

/// Kind of a node event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    StartElement,
    EndElement,
    Text,
}

/// One node pulled from the XML stream.
#[derive(Debug, Clone)]
pub struct NodeEvent {
    pub kind: NodeKind,
    /// Local element name (namespace prefix stripped); empty for text.
    pub name: String,
    /// Nesting depth; the root element and its end tag are depth 1.
    pub depth: usize,
    /// Unescaped text content; empty for element events.
    pub value: String,
}

/// A parse or structural error reported by the underlying XML stream.
#[derive(Debug, thiserror::Error)]
#[error("{message} (byte {code})")]
pub struct XmlReadError {
    pub message: String,
    pub code: u64,
}

type Source = DecodingReader<std::io::Chain<io::Cursor<Vec<u8>>, Box<dyn Read + Send>>>;

/// Pull reader for one XML document.
pub struct XmlNodeReader {
    reader: Reader<BufReader<Source>>,
    buf: Vec<u8>,
    depth: usize,
    /// Synthetic end event queued when an empty element is split.
    pending: Option<NodeEvent>,
}

impl XmlNodeReader {
    /// Open a reader over a byte stream, negotiating the encoding.
    ///
    /// `encoding` overrides BOM and XML-declaration detection when set.
    pub fn open(mut source: Box<dyn Read + Send>, encoding: Option<&str>) -> io::Result<Self> {
        let prefix = read_prefix(&mut source)?;
        let enc = negotiate_encoding(&prefix, encoding);
        let chained = io::Cursor::new(prefix).chain(source);
        let decoded = DecodingReader::new(chained, enc);

        let mut reader = Reader::from_reader(BufReader::new(decoded));
        reader.config_mut().trim_text(true);
        Ok(Self {
            reader,
            buf: Vec::new(),
            depth: 0,
            pending: None,
        })
    }

    /// Pull the next node event.
    ///
    /// Returns `Ok(None)` at end of document. Any underlying parse error
    /// is returned immediately; the reader must not be used afterwards.
    pub fn read(&mut self) -> Result<Option<NodeEvent>, XmlReadError> {
        if let Some(event) = self.pending.take() {
            self.depth = event.depth - 1;
            return Ok(Some(event));
        }
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => {
                    self.depth += 1;
                    return Ok(Some(NodeEvent {
                        kind: NodeKind::StartElement,
                        name: local_name(e.local_name().as_ref()),
                        depth: self.depth,
                        value: String::new(),
                    }));
                }
                Ok(Event::Empty(e)) => {
                    let depth = self.depth + 1;
                    let name = local_name(e.local_name().as_ref());
                    self.pending = Some(NodeEvent {
                        kind: NodeKind::EndElement,
                        name: name.clone(),
                        depth,
                        value: String::new(),
                    });
                    self.depth = depth;
                    return Ok(Some(NodeEvent {
                        kind: NodeKind::StartElement,
                        name,
                        depth,
                        value: String::new(),
                    }));
                }
                Ok(Event::End(e)) => {
                    let depth = self.depth;
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(Some(NodeEvent {
                        kind: NodeKind::EndElement,
                        name: local_name(e.local_name().as_ref()),
                        depth,
                        value: String::new(),
                    }));
                }
                Ok(Event::Text(e)) => {
                    let value = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(err) => return Err(read_error(err, self.reader.buffer_position() as u64)),
                    };
                    return Ok(Some(NodeEvent {
                        kind: NodeKind::Text,
                        name: String::new(),
                        depth: self.depth,
                        value,
                    }));
                }
                Ok(Event::CData(e)) => {
                    return Ok(Some(NodeEvent {
                        kind: NodeKind::Text,
                        name: String::new(),
                        depth: self.depth,
                        value: String::from_utf8_lossy(&e.into_inner()).into_owned(),
                    }));
                }
                Ok(Event::Eof) => return Ok(None),
                // Declarations, comments, PIs, doctypes: invisible here.
                Ok(_) => continue,
                Err(err) => return Err(read_error(err, self.reader.buffer_position() as u64)),
            }
        }
    }

    /// Current element nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

fn read_error(err: impl std::fmt::Display, code: u64) -> XmlReadError {
    XmlReadError {
        message: err.to_string(),
        code,
    }
}

/// Error for a document that ends inside an open element.
pub(crate) fn truncated(context: &str) -> XmlReadError {
    XmlReadError {
        message: format!("unexpected end of document inside <{context}>"),
        code: 0,
    }
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn read_prefix(source: &mut Box<dyn Read + Send>) -> io::Result<Vec<u8>> {
    let mut prefix = vec![0u8; PREFIX_LEN];
    let mut filled = 0;
    while filled < PREFIX_LEN {
        let n = source.read(&mut prefix[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    prefix.truncate(filled);
    Ok(prefix)
}
