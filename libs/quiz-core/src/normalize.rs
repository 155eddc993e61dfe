//! Attachment URL normalization.
//!
//! Relative asset references are rewritten into a canonical rooted form so
//! a consuming application can resolve them regardless of where the source
//! markdown lived. Normalization returns new values instead of rewriting
//! records in place; callers swap whole attachments.

use crate::types::Attachment;

/// Prefix marking a path as relative to the declared content root.
pub const ROOT_MARKER: &str = "~";

/// Outcome of normalizing one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub url: String,
    /// Whether the reference was rewritten (for summary counts).
    pub changed: bool,
}

/// Canonicalize a raw reference against a document directory.
///
/// `rel_dir` is the document's directory relative to the declared root,
/// `/`-separated, empty for root-level documents. External URLs, already
/// rooted paths, and absolute paths pass through verbatim (after trimming),
/// which makes the function idempotent. Any input produces a valid result.
pub fn normalize_url(raw: &str, rel_dir: &str) -> NormalizedUrl {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NormalizedUrl { url: raw.to_string(), changed: false };
    }
    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with(ROOT_MARKER)
        || trimmed.starts_with('/')
    {
        return NormalizedUrl { url: trimmed.to_string(), changed: trimmed != raw };
    }

    let clean = trimmed.strip_prefix("./").unwrap_or(trimmed).trim_start_matches('/');
    let mut parts: Vec<&str> = vec![ROOT_MARKER];
    parts.extend(rel_dir.split('/').filter(|segment| !segment.is_empty()));
    parts.push(clean);
    NormalizedUrl { url: parts.join("/"), changed: true }
}

/// Normalize one attachment, returning the new record and whether the URL
/// changed.
pub fn normalize_attachment(attachment: &Attachment, rel_dir: &str) -> (Attachment, bool) {
    let normalized = normalize_url(&attachment.url, rel_dir);
    (
        Attachment {
            id: attachment.id.clone(),
            url: normalized.url,
            kind: attachment.kind,
        },
        normalized.changed,
    )
}
