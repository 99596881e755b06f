//! Error types for sitemap traversal.

use crate::reader::XmlReadError;

/// Errors surfaced by the sitemap cursor.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// The root sitemap URI could not be opened.
    ///
    /// Nested sitemap references that fail to open are skipped with a
    /// warning instead of raising this error.
    #[error("failed to open sitemap source `{uri}`: {source}")]
    OpenFailed {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying XML stream reported a parse or structural error.
    ///
    /// Fatal for the current cursor: the reader stack is left in an
    /// inconsistent state and must not be reused without a fresh open.
    #[error("invalid sitemap (code {code}): {message}")]
    InvalidSitemap { message: String, code: u64 },
}

impl From<XmlReadError> for SitemapError {
    fn from(err: XmlReadError) -> Self {
        SitemapError::InvalidSitemap {
            message: err.message,
            code: err.code,
        }
    }
}
