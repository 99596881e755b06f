//! Blocking HTTP opener.

use std::io::{self, Read};
use std::time::Duration;

use super::SourceOpener;

/// Fetches `http`/`https` URIs with a blocking client.
///
/// Nested sitemaps are fetched strictly sequentially, one open response
/// per stack depth, so resource usage stays bounded.
#[derive(Debug)]
pub struct HttpOpener {
    client: reqwest::blocking::Client,
}

impl Default for HttpOpener {
    fn default() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("sitemap-stream/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl SourceOpener for HttpOpener {
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read + Send>> {
        let response = self
            .client
            .get(uri)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(Box::new(response))
    }
}
