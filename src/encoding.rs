//! Charset sniffing for byte input.
//!
//! A byte order mark wins, then a charset declared in the first kilobyte of
//! markup, then UTF-8. Undecodable sequences become U+FFFD.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use tracing::debug;

/// Bytes searched for a `<meta>` charset declaration.
const SNIFF_WINDOW: usize = 1024;

/// `<meta charset=...>` and the `content="...; charset=..."` form of
/// `http-equiv="Content-Type"`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?\bcharset\s*=\s*["']?\s*([A-Za-z0-9_:.\-]+)"#).expect("META_CHARSET regex")
});

/// The encoding declared inside the markup, if it names a known label.
#[must_use]
pub fn declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let window = String::from_utf8_lossy(&html[..html.len().min(SNIFF_WINDOW)]);
    META_CHARSET
        .captures_iter(&window)
        .filter_map(|caps| caps.get(1))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
}

/// Encoding to decode `html` with.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    declared_encoding(html).unwrap_or(UTF_8)
}

/// Decode `html` into UTF-8 text.
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = sniff_encoding(html);
    // decode() strips a matching BOM
    let (text, used, had_errors) = encoding.decode(html);
    if had_errors {
        debug!(encoding = used.name(), "replaced malformed byte sequences");
    }
    text.into_owned()
}
