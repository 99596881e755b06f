//! The traversal engine: a stack of readers and the descent loop.
//!
//! One frame per open document. The root sitemap sits at the bottom;
//! every `<sitemap>` reference that survives the date filter pushes a
//! frame, and a frame is popped only when its document is exhausted.
//! Advancing the cursor means looping over the top frame's node events
//! until a `<url>` entry passes the filters or every frame is drained.

use crate::error::SitemapError;
use crate::options::SitemapOptions;
use crate::reader::{NodeKind, XmlNodeReader};
use crate::source::SourceOpener;
use crate::traverse::filter::FilterPolicy;
use crate::traverse::record::{build_url_record, read_sitemap_reference, UrlRecord};

/// One open document on the traversal stack.
struct ReaderFrame {
    uri: String,
    reader: XmlNodeReader,
}

/// Pull-based recursive-descent traversal over nested sitemaps.
///
/// No cycle detection: a sitemap index that references itself, directly
/// or transitively, recurses until `max_depth` stops it — and without a
/// configured `max_depth`, forever. The stack is explicit, so depth costs
/// one open reader, not native call-stack.
pub(crate) struct TraversalEngine {
    stack: Vec<ReaderFrame>,
    opener: Box<dyn SourceOpener>,
    filter: FilterPolicy,
    encoding: Option<String>,
    max_depth: Option<usize>,
}

impl TraversalEngine {
    pub fn new(opener: Box<dyn SourceOpener>, options: &SitemapOptions) -> Self {
        Self {
            stack: Vec::new(),
            opener,
            filter: FilterPolicy::from_options(options),
            encoding: options.encoding.clone(),
            max_depth: options.max_depth,
        }
    }

    /// Open the root document. Fails hard; there is nothing to traverse
    /// without it.
    pub fn open_root(&mut self, uri: &str) -> Result<(), SitemapError> {
        debug_assert!(self.stack.is_empty());
        let frame = self.open_frame(uri).map_err(|source| SitemapError::OpenFailed {
            uri: uri.to_string(),
            source,
        })?;
        self.stack.push(frame);
        Ok(())
    }

    /// Find the next qualifying URL record, or `None` when every frame
    /// is exhausted.
    pub fn next_record(&mut self) -> Result<Option<UrlRecord>, SitemapError> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Ok(None);
            };
            let Some(event) = frame.reader.read()? else {
                // Document exhausted: drop the frame, resume the parent.
                let frame = self.stack.pop();
                if let Some(frame) = frame {
                    tracing::debug!(uri = %frame.uri, "sitemap exhausted");
                }
                continue;
            };
            match event.kind {
                NodeKind::StartElement => match event.name.as_str() {
                    // Pure containers.
                    "sitemapindex" | "urlset" => {}
                    "sitemap" => {
                        let reference = read_sitemap_reference(&mut frame.reader, &event)?;
                        if self.filter.skip_by_lastmod(reference.lastmod.as_deref()) {
                            tracing::debug!(
                                loc = reference.loc.as_deref().unwrap_or(""),
                                "sub-sitemap pruned by lastmod"
                            );
                        } else if let Some(loc) = reference.loc {
                            self.push_nested(&loc);
                        }
                    }
                    "url" => {
                        if let Some(record) =
                            build_url_record(&mut frame.reader, &event, &self.filter)?
                        {
                            return Ok(Some(record));
                        }
                    }
                    _ => {}
                },
                // A stray </sitemap> outside reference consumption means
                // this frame has nothing left for us.
                NodeKind::EndElement if event.name == "sitemap" => {
                    self.stack.pop();
                }
                _ => {}
            }
        }
    }

    /// Depth of the reader stack (root document = 1).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Close every frame. Idempotent.
    pub fn close_all(&mut self) {
        self.stack.clear();
    }

    /// Open a nested sitemap reference; failures skip the reference.
    fn push_nested(&mut self, uri: &str) {
        if let Some(max) = self.max_depth {
            if self.stack.len() >= max {
                tracing::warn!(uri, max_depth = max, "nested sitemap beyond max_depth, skipping");
                return;
            }
        }
        match self.open_frame(uri) {
            Ok(frame) => self.stack.push(frame),
            Err(err) => tracing::warn!(uri, error = %err, "failed to open nested sitemap, skipping"),
        }
    }

    fn open_frame(&self, uri: &str) -> std::io::Result<ReaderFrame> {
        let source = self.opener.open(uri)?;
        let reader = XmlNodeReader::open(source, self.encoding.as_deref())?;
        Ok(ReaderFrame {
            uri: uri.to_string(),
            reader,
        })
    }
}
