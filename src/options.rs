//! Traversal configuration.
//!
//! Options are fixed when the cursor is opened; the date threshold is
//! normalized once into a UTC comparable form by the filter policy.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Configuration for a sitemap traversal.
#[derive(Debug, Clone, Default)]
pub struct SitemapOptions {
    /// Keep only entries whose `lastmod` is strictly after this instant.
    ///
    /// Applies to `<url>` records and to `<sitemap>` references alike; a
    /// reference that fails the threshold is never opened, pruning the
    /// whole sub-document.
    pub modified_since: Option<DateTime<FixedOffset>>,
    /// Skip records whose explicit priority is below this value.
    ///
    /// Records without a priority are never skipped by this filter.
    pub min_priority: Option<f64>,
    /// Character encoding override passed to the XML reader.
    ///
    /// When unset, encoding is negotiated from the BOM and the XML
    /// declaration, defaulting to UTF-8.
    pub encoding: Option<String>,
    /// Refuse to open nested sitemaps beyond this stack depth.
    ///
    /// Off by default. Sitemap indexes that reference themselves recurse
    /// without bound unless this guard is set.
    pub max_depth: Option<usize>,
}

/// Parse a W3C datetime string as used by sitemap `<lastmod>` elements.
///
/// Accepts full RFC 3339 timestamps, timestamps without seconds, naive
/// timestamps (assumed UTC), and bare dates (midnight UTC).
pub fn parse_w3c_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive).fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive).fixed_offset());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_w3c_datetime("2026-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.with_timezone(&Utc).timestamp(), 1768465800);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_w3c_datetime("2026-01-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_naive_datetime_assumes_utc() {
        let dt = parse_w3c_datetime("2026-01-15T10:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_w3c_datetime("soon").is_none());
        assert!(parse_w3c_datetime("").is_none());
    }
}
