//! Record filtering by priority and modification date.

use chrono::{DateTime, Utc};

use crate::options::{parse_w3c_datetime, SitemapOptions};

/// Skip predicates derived from [`SitemapOptions`], normalized at open.
///
/// Both predicates answer "skip this entry?" and apply identically to
/// `<url>` records and `<sitemap>` references. A reference skipped by
/// date is never opened, so its whole sub-document is pruned unread.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    min_priority: Option<f64>,
    /// Threshold as UTC seconds; comparison precision is one second.
    modified_since: Option<i64>,
}

impl FilterPolicy {
    pub fn from_options(options: &SitemapOptions) -> Self {
        Self {
            min_priority: options.min_priority,
            modified_since: options
                .modified_since
                .map(|dt| dt.with_timezone(&Utc).timestamp()),
        }
    }

    /// Skip iff a priority is present and below the configured minimum.
    ///
    /// Absent priority never triggers the filter; equal priority is kept.
    pub fn skip_by_priority(&self, priority: Option<f64>) -> bool {
        match (priority, self.min_priority) {
            (Some(p), Some(min)) => p < min,
            _ => false,
        }
    }

    /// Skip iff a lastmod is present and not strictly after the threshold.
    ///
    /// "Modified since" is an exclusive bound: a lastmod equal to the
    /// threshold is skipped. Unparseable lastmod text is treated as
    /// absent and never skips.
    pub fn skip_by_lastmod(&self, lastmod: Option<&str>) -> bool {
        let (Some(raw), Some(threshold)) = (lastmod, self.modified_since) else {
            return false;
        };
        match parse_w3c_datetime(raw) {
            Some(dt) => dt.with_timezone(&Utc).timestamp() <= threshold,
            None => {
                tracing::warn!(lastmod = raw, "unparseable lastmod, not filtering");
                false
            }
        }
    }
}

/// Parse a lastmod string to the local timezone for the exposed record.
pub(crate) fn lastmod_to_local(raw: &str) -> Option<DateTime<chrono::Local>> {
    parse_w3c_datetime(raw).map(|dt| dt.with_timezone(&chrono::Local))
}
