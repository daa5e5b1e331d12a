//! Article title helpers.

/// Identity key for cycle detection: trimmed, Unicode-lowercased title.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Turn a display title into the path segment used in article URLs.
pub fn title_to_path(title: &str) -> String {
    title.trim().replace(' ', "_")
}

/// Returns true if `href` points at a mainspace article (`/wiki/<Title>`
/// with no namespace separator in the title part).
pub fn is_mainspace_href(href: &str) -> bool {
    let Some(rest) = href.strip_prefix("/wiki/") else {
        return false;
    };
    let title = rest.split('#').next().unwrap_or_default();
    if title.is_empty() {
        return false;
    }
    !(title.contains(':') || title.to_ascii_lowercase().contains("%3a"))
}
