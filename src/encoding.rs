//! Character encoding detection and transcoding.
//!
//! EPUB chapter files are nominally UTF-8 XHTML, but older conversions ship
//! latin-1 or windows-1252 bytes with an XML declaration or meta tag naming
//! the real charset. Byte input is sniffed here and transcoded to UTF-8
//! before parsing.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `<?xml version="1.0" encoding="..."?>` declaration, the usual EPUB form.
#[allow(clippy::expect_used)]
static XML_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<\?xml[^>]+encoding\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});

/// `<meta charset="...">` tag.
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">` tag.
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("valid regex")
});

/// Detect the character encoding declared by a chapter document.
///
/// Declarations are tried in order: XML declaration, `<meta charset>`,
/// `http-equiv` content type. Only the first 1024 bytes are examined.
/// Defaults to UTF-8.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let head = &bytes[..bytes.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    for re in [&XML_DECL_RE, &CHARSET_META_RE, &CONTENT_TYPE_CHARSET_RE] {
        if let Some(label) = re.captures(&head_str).and_then(|c| c.get(1)) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return encoding;
            }
        }
    }
    UTF_8
}

/// Transcode chapter bytes to a UTF-8 string.
///
/// Invalid sequences are replaced rather than rejected; the heuristics
/// downstream tolerate replacement characters far better than a hard error
/// would serve a batch caller.
#[must_use]
pub fn transcode_to_utf8(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}
