//! The public cursor over a sitemap traversal.

use crate::error::SitemapError;
use crate::options::SitemapOptions;
use crate::source::{DefaultOpener, SourceOpener};
use crate::traverse::engine::TraversalEngine;
use crate::traverse::record::UrlRecord;

/// A pull cursor over every qualifying URL record reachable from one
/// root sitemap.
///
/// The cursor walks the root document and every nested sitemap it
/// references, one record per [`advance`](Self::advance), holding at
/// most one open reader per nesting level. Check
/// [`valid`](Self::valid) after each advance; `key`/`current` go stale,
/// not empty, once the traversal is exhausted.
///
/// ```no_run
/// use sitemap_stream::{SitemapCursor, SitemapOptions};
///
/// let mut cursor = SitemapCursor::open("https://example.com/sitemap.xml", SitemapOptions::default())?;
/// while cursor.advance()? {
///     let record = cursor.current().unwrap();
///     println!("{} priority={:?}", record.loc, record.priority);
/// }
/// # Ok::<(), sitemap_stream::SitemapError>(())
/// ```
pub struct SitemapCursor {
    engine: TraversalEngine,
    root_uri: String,
    current: Option<(String, UrlRecord)>,
    valid: bool,
    started: bool,
}

impl SitemapCursor {
    /// Open a cursor with the default opener (filesystem and HTTP).
    ///
    /// Fails if the root document cannot be opened.
    pub fn open(uri: &str, options: SitemapOptions) -> Result<Self, SitemapError> {
        Self::open_with(uri, options, Box::new(DefaultOpener::default()))
    }

    /// Open a cursor with a caller-supplied source opener.
    pub fn open_with(
        uri: &str,
        options: SitemapOptions,
        opener: Box<dyn SourceOpener>,
    ) -> Result<Self, SitemapError> {
        let mut engine = TraversalEngine::new(opener, &options);
        engine.open_root(uri)?;
        Ok(Self {
            engine,
            root_uri: uri.to_string(),
            current: None,
            valid: false,
            started: false,
        })
    }

    /// Move to the next qualifying record.
    ///
    /// Returns `true` when a record is available. Returns `false` at
    /// exhaustion, leaving the previous `key`/`current` stale. A parse
    /// error is fatal for this cursor; reopen to traverse again.
    pub fn advance(&mut self) -> Result<bool, SitemapError> {
        self.started = true;
        match self.engine.next_record()? {
            Some(record) => {
                self.current = Some((record.loc.clone(), record));
                self.valid = true;
                Ok(true)
            }
            None => {
                self.valid = false;
                Ok(false)
            }
        }
    }

    /// Position on the first record.
    ///
    /// Before the first advance this just primes the cursor. Afterwards
    /// it is a full restart: every frame is closed, the root document is
    /// reopened, and the identical sequence replays from the beginning.
    /// There is no partial rewind.
    pub fn reset(&mut self) -> Result<bool, SitemapError> {
        if self.started {
            self.engine.close_all();
            self.engine.open_root(&self.root_uri)?;
            self.current = None;
            self.valid = false;
        }
        self.advance()
    }

    /// Close every open reader. Idempotent; the cursor is exhausted
    /// afterwards until `reset` reopens it.
    pub fn close(&mut self) {
        self.engine.close_all();
        self.valid = false;
    }

    /// Whether the cursor currently denotes a usable record.
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Key of the last accepted record: its `loc` URL.
    pub fn key(&self) -> Option<&str> {
        self.current.as_ref().map(|(key, _)| key.as_str())
    }

    /// The last accepted record.
    pub fn current(&self) -> Option<&UrlRecord> {
        self.current.as_ref().map(|(_, record)| record)
    }

    /// Iterate the remaining records as `(loc, record)` pairs.
    ///
    /// A convenience over the advance/current protocol for `for` loops;
    /// a parse error ends the iteration after yielding the error.
    pub fn records(&mut self) -> Records<'_> {
        Records { cursor: self }
    }
}

/// Iterator adapter returned by [`SitemapCursor::records`].
pub struct Records<'a> {
    cursor: &'a mut SitemapCursor,
}

impl Iterator for Records<'_> {
    type Item = Result<(String, UrlRecord), SitemapError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor.advance() {
            Ok(true) => self
                .cursor
                .current
                .clone()
                .map(Ok),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
