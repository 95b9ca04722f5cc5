/// Escape text for embedding in HTML element content or a quoted attribute.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only `http(s)` links are rendered as anchors; anything else is shown as text.
pub(crate) fn is_web_link(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn keeps_non_ascii() {
        assert_eq!(escape_html("日本語 <b>"), "日本語 &lt;b&gt;");
    }

    #[test]
    fn web_link_requires_http_scheme() {
        assert!(is_web_link("http://arxiv.org/abs/2405.00001v1"));
        assert!(is_web_link("https://arxiv.org/abs/2405.00001v1"));
        assert!(!is_web_link("javascript:alert(1)"));
    }
}
