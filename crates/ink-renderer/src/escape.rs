//! HTML escaping.

/// Escape text for safe inclusion in HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">[[a]] & 'b'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;[[a]] &amp; &#x27;b&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_plain() {
        assert_eq!(escape_html("plain text"), "plain text");
    }
}
