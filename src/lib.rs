//! Pull-based streaming traversal of XML sitemaps.
//!
//! Walks a `urlset` document, or a `sitemapindex` referencing many
//! sub-sitemaps, yielding one normalized URL record at a time without
//! loading any document into memory. Nested sitemaps are handled with an
//! explicit stack of streaming readers: at most one open reader per
//! nesting level, sub-documents fetched strictly sequentially, and a
//! sub-sitemap whose `lastmod` fails the configured date filter is never
//! fetched at all.
//!
//! The fixed sitemap vocabulary (`loc`, `lastmod`, `priority`,
//! `changefreq`) maps to typed record fields; every other child of a
//! `<url>` entry is captured generically as an [`ElementValue`] keyed by
//! local name, so image/video/news extensions come through without
//! schema knowledge. This is not a validating parser; malformed XML is
//! detected only as far as the underlying reader reports it, and then it
//! is fatal for the cursor.

pub mod cursor;
pub mod error;
pub mod options;
pub mod reader;
pub mod source;
pub mod traverse;

#[cfg(test)]
pub(crate) mod test_support;

pub use cursor::{Records, SitemapCursor};
pub use error::SitemapError;
pub use options::SitemapOptions;
pub use source::{DefaultOpener, FileOpener, HttpOpener, SourceOpener};
pub use traverse::{ElementValue, FilterPolicy, UrlRecord};
