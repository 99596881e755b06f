//! Opening sitemap URIs as byte streams.
//!
//! Traversal never fetches anything itself; it asks a [`SourceOpener`] for
//! a readable stream whenever it needs the root document or a nested
//! sitemap reference. The default opener dispatches on the URI scheme:
//! `http`/`https` go through the blocking HTTP client, `file://` and bare
//! paths go to the filesystem.

pub mod http;

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use url::Url;

pub use http::HttpOpener;

/// Opens a URI as a byte stream.
///
/// Implement this to plug in custom fetching (caching, auth, in-memory
/// fixtures). Opening must be synchronous; the traversal model is a
/// single-threaded pull loop.
pub trait SourceOpener: Send {
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read + Send>>;
}

/// Opens filesystem paths and `file://` URIs.
#[derive(Debug, Default)]
pub struct FileOpener;

impl SourceOpener for FileOpener {
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read + Send>> {
        let path = file_path(uri)?;
        let file = File::open(path)?;
        Ok(Box::new(file))
    }
}

/// Scheme-dispatching opener used when the caller does not supply one.
#[derive(Debug, Default)]
pub struct DefaultOpener {
    file: FileOpener,
    http: HttpOpener,
}

impl SourceOpener for DefaultOpener {
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read + Send>> {
        match Url::parse(uri) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => self.http.open(uri),
            _ => self.file.open(uri),
        }
    }
}

/// Resolve a URI to a filesystem path.
///
/// `file://` URIs are converted; anything else is taken as a literal path
/// (absolute or relative to the working directory).
fn file_path(uri: &str) -> io::Result<PathBuf> {
    if let Ok(url) = Url::parse(uri) {
        if url.scheme() == "file" {
            return url
                .to_file_path()
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, format!("bad file URI: {uri}")));
        }
    }
    Ok(PathBuf::from(uri))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_plain_path() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"<urlset/>").unwrap();

        let mut stream = FileOpener.open(tmp.path().to_str().unwrap()).unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert_eq!(out, "<urlset/>");
    }

    #[test]
    fn test_open_file_uri() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"ok").unwrap();

        let uri = format!("file://{}", tmp.path().display());
        let mut stream = DefaultOpener::default().open(&uri).unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert_eq!(out, "ok");
    }

    #[test]
    fn test_open_missing_file() {
        assert!(FileOpener.open("/nonexistent/sitemap.xml").is_err());
    }
}
