//! HTML text helpers shared by templates and providers.

/// Escape text for use in HTML element content or quoted attribute values.
pub fn escape(s: &str) -> String {
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

/// Escape for XML; same entity set as [`escape`] but with `&apos;`.
pub fn escape_xml(s: &str) -> String {
    escape(s).replace("&#39;", "&apos;")
}

/// `<a>` element. External links open in a new tab.
pub fn link(href: &str, text: &str) -> String {
    let external = href.starts_with("http://") || href.starts_with("https://");
    let target = if external {
        r#" target="_blank" rel="noreferrer""#
    } else {
        ""
    };
    format!(r#"<a href="{}"{target}>{}</a>"#, escape(href), escape(text))
}
