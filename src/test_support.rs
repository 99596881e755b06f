//! In-memory source opener for unit tests.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};

use crate::source::SourceOpener;

/// Serves documents from a URI -> body map.
pub(crate) struct MapOpener {
    docs: HashMap<String, String>,
}

impl MapOpener {
    pub fn new<const N: usize>(docs: [(&str, &str); N]) -> Self {
        Self {
            docs: docs
                .into_iter()
                .map(|(uri, body)| (uri.to_string(), body.to_string()))
                .collect(),
        }
    }
}

impl SourceOpener for MapOpener {
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read + Send>> {
        match self.docs.get(uri) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone().into_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such document: {uri}"),
            )),
        }
    }
}
