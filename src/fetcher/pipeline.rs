use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decode a fetched page into text ready for HTML parsing.
///
/// Decoding is lossy: malformed sequences become U+FFFD so a page with a few
/// bad bytes still yields its rows.
pub fn decode_html(body: &[u8]) -> String {
    let encoding = detect_encoding(body);
    let (decoded, used, had_errors) = encoding.decode(body);

    if had_errors {
        warn!(encoding = used.name(), "page contained malformed byte sequences");
    }

    decoded.into_owned()
}

fn detect_encoding(body: &[u8]) -> &'static Encoding {
    // 1. Check for <meta charset> in first 4KB
    let search_bytes = &body[..body.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    for regex in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(captures) = regex.captures(&search_str)
            && let Some(charset_str) = captures.get(1)
            && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
        {
            return encoding;
        }
    }

    // 2. Use chardet for heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, search_bytes.len() == body.len());
    detector.guess(None, true)
}
