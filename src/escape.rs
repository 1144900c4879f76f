// HTML and URI escaping for rendered output.
//
// `escape_html` is entity-aware: an `&` that already begins a character
// reference (`&amp;`, `&#39;`, `&#x27;`) is left alone so that rendering
// is idempotent over pre-escaped fragments.

/// Escape `"`, `'`, `<`, `>` and bare `&` for text content.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => {
                if starts_entity(&input[i + 1..]) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Whether `rest` (the text after an `&`) completes a character reference:
/// `name;`, `#digits;` or `#x hexdigits;`.
fn starts_entity(rest: &str) -> bool {
    let body = match rest.split_once(';') {
        Some((body, _)) => body,
        None => return false,
    };
    if let Some(num) = body.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        return !num.is_empty() && num.chars().all(|c| c.is_ascii_digit());
    }
    !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Escape quotes and angle brackets for attribute values. Ampersands are
/// intentionally left alone (attribute values carry pre-encoded URLs).
pub(crate) fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// Characters a URI keeps verbatim: unreserved plus the reserved set, the
// same table JavaScript's encodeURI uses.
fn is_uri_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || ";,/?:@&=+$-_.!~*'()#".contains(c)
}

/// Percent-encode a URL for an `href`/`src` attribute.
pub(crate) fn encode_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if is_uri_safe(c) {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_basic() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html(r#""quoted" & 'single'"#), "&quot;quoted&quot; &amp; &#39;single&#39;");
    }

    #[test]
    fn test_escape_html_keeps_entities() {
        assert_eq!(escape_html("&amp; &#39; &#x27;"), "&amp; &#39; &#x27;");
        assert_eq!(escape_html("&notanentity"), "&amp;notanentity");
        assert_eq!(escape_html("&;"), "&amp;;");
        assert_eq!(escape_html("&#;"), "&amp;#;");
    }

    #[test]
    fn test_escape_attr_leaves_ampersand() {
        assert_eq!(escape_attr("a&b\"c"), "a&b&quot;c");
    }

    #[test]
    fn test_encode_uri() {
        assert_eq!(encode_uri("https://a.com/b?c=d&e=f#g"), "https://a.com/b?c=d&e=f#g");
        assert_eq!(encode_uri("https://a.com/a b"), "https://a.com/a%20b");
        assert_eq!(encode_uri("/r/ähnlich"), "/r/%C3%A4hnlich");
    }
}
