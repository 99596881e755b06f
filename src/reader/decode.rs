//! Incremental character-set decoding for XML byte streams.
//!
//! quick-xml consumes UTF-8; everything else is transcoded on the fly so
//! traversal stays streaming. The decoder keeps its own state across
//! `read` calls, so multi-byte sequences split over chunk boundaries are
//! handled correctly, and a leading BOM is honored and stripped.

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, Encoding};

const CHUNK: usize = 8 * 1024;

/// Negotiate the encoding of a document from its first bytes.
///
/// Priority: caller override, then BOM (handled inside the decoder), then
/// the XML declaration's `encoding` pseudo-attribute, then UTF-8. An
/// unknown label falls back to UTF-8 with a warning.
pub fn negotiate_encoding(prefix: &[u8], label_override: Option<&str>) -> &'static Encoding {
    let label = label_override
        .map(str::to_owned)
        .or_else(|| declared_encoding(prefix));
    match label {
        Some(label) => Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
            tracing::warn!(%label, "unknown encoding label, falling back to UTF-8");
            encoding_rs::UTF_8
        }),
        None => encoding_rs::UTF_8,
    }
}

/// Extract the `encoding="..."` value from an XML declaration, if any.
fn declared_encoding(prefix: &[u8]) -> Option<String> {
    if !prefix.starts_with(b"<?xml") {
        return None;
    }
    let end = prefix.iter().position(|&b| b == b'>')?;
    let decl = std::str::from_utf8(&prefix[..end]).ok()?;
    let rest = decl.split("encoding").nth(1)?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = rest[1..].split(quote).next()?;
    Some(value.to_string())
}

/// A `Read` adapter that decodes `inner` into UTF-8.
pub struct DecodingReader<R> {
    inner: R,
    decoder: Decoder,
    in_buf: Box<[u8; CHUNK]>,
    out: Vec<u8>,
    out_pos: usize,
    done: bool,
}

impl<R: Read> DecodingReader<R> {
    /// Wrap `inner`, decoding from `encoding` (BOM sniffing enabled).
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: encoding.new_decoder(),
            in_buf: Box::new([0; CHUNK]),
            out: Vec::new(),
            out_pos: 0,
            done: false,
        }
    }

    /// Decode one input chunk into the output buffer.
    fn refill(&mut self) -> io::Result<()> {
        let n = self.inner.read(&mut self.in_buf[..])?;
        let last = n == 0;
        self.out.clear();
        self.out_pos = 0;

        let mut consumed = 0;
        loop {
            let mut dst = [0u8; CHUNK];
            let (result, read, written, _) =
                self.decoder
                    .decode_to_utf8(&self.in_buf[consumed..n], &mut dst, last);
            self.out.extend_from_slice(&dst[..written]);
            consumed += read;
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
        if last {
            self.done = true;
        }
        Ok(())
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.out_pos < self.out.len() {
                let n = buf.len().min(self.out.len() - self.out_pos);
                buf[..n].copy_from_slice(&self.out[self.out_pos..self.out_pos + n]);
                self.out_pos += n;
                return Ok(n);
            }
            if self.done {
                return Ok(0);
            }
            self.refill()?;
        }
    }
}
