//! Title-to-slug conversion for aggregate identifiers.

/// Turn a quiz title into a URL-safe slug.
///
/// `+`, `#` and `&` become words so "C++ Quiz" and "C# Quiz" stay
/// distinguishable; every other non-alphanumeric run collapses to a single
/// hyphen.
pub fn slugify(text: &str) -> String {
    let expanded = text
        .to_lowercase()
        .replace('+', " plus ")
        .replace('#', " sharp ")
        .replace('&', " and ");

    let mut slug = String::with_capacity(expanded.len());
    let mut gap = false;
    for c in expanded.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c);
        } else {
            gap = true;
        }
    }
    slug
}
