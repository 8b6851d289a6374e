//! HTML escaping for feed text placed into generated markup.

/// Escape text for use between tags
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double- or single-quoted attribute
pub fn escape_attr(s: &str) -> String {
    escape_html(s)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
