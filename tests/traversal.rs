//! End-to-end traversal over file-backed sitemaps.

use std::fs;
use std::path::Path;

use sitemap_stream::options::parse_w3c_datetime;
use sitemap_stream::{ElementValue, SitemapCursor, SitemapError, SitemapOptions};

fn write(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

fn collect_keys(cursor: &mut SitemapCursor) -> Vec<String> {
    let mut keys = Vec::new();
    while cursor.advance().unwrap() {
        keys.push(cursor.key().unwrap().to_string());
    }
    keys
}

#[test]
fn yields_every_record_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "sitemap.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>https://example.com/</loc><priority>1.0</priority></url>
            <url><loc>https://example.com/about</loc><changefreq>monthly</changefreq></url>
            <url><loc>https://example.com/blog</loc><lastmod>2026-02-01</lastmod></url>
        </urlset>"#,
    );

    let mut cursor = SitemapCursor::open(&root, SitemapOptions::default()).unwrap();
    assert_eq!(
        collect_keys(&mut cursor),
        [
            "https://example.com/",
            "https://example.com/about",
            "https://example.com/blog",
        ]
    );
}

#[test]
fn priority_filter_keeps_absent_and_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "sitemap.xml",
        r#"<urlset>
            <url><loc>https://a/low</loc><priority>0.4</priority></url>
            <url><loc>https://a/boundary</loc><priority>0.5</priority></url>
            <url><loc>https://a/high</loc><priority>0.9</priority></url>
            <url><loc>https://a/none</loc></url>
        </urlset>"#,
    );

    let options = SitemapOptions {
        min_priority: Some(0.5),
        ..Default::default()
    };
    let mut cursor = SitemapCursor::open(&root, options).unwrap();
    assert_eq!(
        collect_keys(&mut cursor),
        ["https://a/boundary", "https://a/high", "https://a/none"]
    );
}

#[test]
fn date_filter_is_exclusive() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "sitemap.xml",
        r#"<urlset>
            <url><loc>https://a/older</loc><lastmod>2026-01-14T23:59:59Z</lastmod></url>
            <url><loc>https://a/equal</loc><lastmod>2026-01-15T00:00:00Z</lastmod></url>
            <url><loc>https://a/newer</loc><lastmod>2026-01-15T00:00:01Z</lastmod></url>
            <url><loc>https://a/undated</loc></url>
        </urlset>"#,
    );

    let options = SitemapOptions {
        modified_since: parse_w3c_datetime("2026-01-15T00:00:00Z"),
        ..Default::default()
    };
    let mut cursor = SitemapCursor::open(&root, options).unwrap();
    assert_eq!(collect_keys(&mut cursor), ["https://a/newer", "https://a/undated"]);
}

#[test]
fn index_concatenates_sub_sitemaps_and_prunes_stale_ones() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(
        dir.path(),
        "first.xml",
        r#"<urlset>
            <url><loc>https://a/1</loc></url>
            <url><loc>https://a/2</loc></url>
        </urlset>"#,
    );
    let second = write(
        dir.path(),
        "second.xml",
        "<urlset><url><loc>https://b/1</loc></url></urlset>",
    );
    // The stale entry points at a file that does not exist: if pruning
    // failed to skip the open, the reference would merely be skipped
    // with a warning, so the zero-records assertion below is what pins
    // the filter, not the missing file.
    let stale = dir.path().join("stale.xml");
    let root = write(
        dir.path(),
        "index.xml",
        &format!(
            r#"<sitemapindex>
                <sitemap><loc>{first}</loc><lastmod>2026-02-01</lastmod></sitemap>
                <sitemap><loc>{stale}</loc><lastmod>2020-01-01</lastmod></sitemap>
                <sitemap><loc>{second}</loc><lastmod>2026-03-01</lastmod></sitemap>
            </sitemapindex>"#,
            stale = stale.display(),
        ),
    );

    let options = SitemapOptions {
        modified_since: parse_w3c_datetime("2026-01-01"),
        ..Default::default()
    };
    let mut cursor = SitemapCursor::open(&root, options).unwrap();
    assert_eq!(
        collect_keys(&mut cursor),
        ["https://a/1", "https://a/2", "https://b/1"]
    );
}

#[test]
fn nested_index_of_indexes() {
    let dir = tempfile::tempdir().unwrap();
    let leaf = write(
        dir.path(),
        "leaf.xml",
        "<urlset><url><loc>https://deep/1</loc></url></urlset>",
    );
    let mid = write(
        dir.path(),
        "mid.xml",
        &format!("<sitemapindex><sitemap><loc>{leaf}</loc></sitemap></sitemapindex>"),
    );
    let root = write(
        dir.path(),
        "root.xml",
        &format!("<sitemapindex><sitemap><loc>{mid}</loc></sitemap></sitemapindex>"),
    );

    let mut cursor = SitemapCursor::open(&root, SitemapOptions::default()).unwrap();
    assert_eq!(collect_keys(&mut cursor), ["https://deep/1"]);
}

#[test]
fn reset_replays_full_multi_document_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(
        dir.path(),
        "sub.xml",
        "<urlset><url><loc>https://s/1</loc></url><url><loc>https://s/2</loc></url></urlset>",
    );
    let root = write(
        dir.path(),
        "root.xml",
        &format!("<sitemapindex><sitemap><loc>{sub}</loc></sitemap></sitemapindex>"),
    );

    let mut cursor = SitemapCursor::open(&root, SitemapOptions::default()).unwrap();
    let first_pass = collect_keys(&mut cursor);
    assert_eq!(first_pass, ["https://s/1", "https://s/2"]);

    assert!(cursor.reset().unwrap());
    let mut second_pass = vec![cursor.key().unwrap().to_string()];
    second_pass.extend(collect_keys(&mut cursor));
    assert_eq!(first_pass, second_pass);
}

#[test]
fn image_extension_exposed_as_nested_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "sitemap.xml",
        r#"<urlset xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
            <url>
                <loc>https://example.com/gallery</loc>
                <image:image>
                    <image:loc>https://example.com/photo.jpg</image:loc>
                </image:image>
            </url>
        </urlset>"#,
    );

    let mut cursor = SitemapCursor::open(&root, SitemapOptions::default()).unwrap();
    assert!(cursor.advance().unwrap());
    let record = cursor.current().unwrap();
    let image = record.extensions["image"].as_map().unwrap();
    assert_eq!(
        image["loc"],
        ElementValue::Text("https://example.com/photo.jpg".into())
    );
}

#[test]
fn truncated_document_raises_invalid_sitemap() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "sitemap.xml",
        "<urlset><url><loc>https://a/1</loc></url><url><loc>https://a/2",
    );

    let mut cursor = SitemapCursor::open(&root, SitemapOptions::default()).unwrap();
    assert!(cursor.advance().unwrap());
    assert!(matches!(
        cursor.advance(),
        Err(SitemapError::InvalidSitemap { .. })
    ));
}

#[test]
fn encoding_override_decodes_legacy_document() {
    let dir = tempfile::tempdir().unwrap();
    // "münchen" with windows-1252 ü (0xFC); no declaration, no BOM.
    let bytes = b"<urlset><url><loc>https://a/m\xfcnchen</loc></url></urlset>".to_vec();
    let path = dir.path().join("legacy.xml");
    fs::write(&path, bytes).unwrap();

    let options = SitemapOptions {
        encoding: Some("windows-1252".into()),
        ..Default::default()
    };
    let mut cursor = SitemapCursor::open(path.to_str().unwrap(), options).unwrap();
    assert!(cursor.advance().unwrap());
    assert_eq!(cursor.key(), Some("https://a/münchen"));
}

#[test]
fn declared_encoding_honored_without_override() {
    let dir = tempfile::tempdir().unwrap();
    let bytes =
        b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><urlset><url><loc>https://a/caf\xe9</loc></url></urlset>"
            .to_vec();
    let path = dir.path().join("declared.xml");
    fs::write(&path, bytes).unwrap();

    let mut cursor = SitemapCursor::open(path.to_str().unwrap(), SitemapOptions::default()).unwrap();
    assert!(cursor.advance().unwrap());
    assert_eq!(cursor.key(), Some("https://a/café"));
}

#[test]
fn records_iterator_over_index() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(
        dir.path(),
        "sub.xml",
        "<urlset><url><loc>https://s/1</loc><priority>0.7</priority></url></urlset>",
    );
    let root = write(
        dir.path(),
        "root.xml",
        &format!("<sitemapindex><sitemap><loc>{sub}</loc></sitemap></sitemapindex>"),
    );

    let mut cursor = SitemapCursor::open(&root, SitemapOptions::default()).unwrap();
    let records: Vec<_> = cursor.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "https://s/1");
    assert_eq!(records[0].1.priority, Some(0.7));
}
