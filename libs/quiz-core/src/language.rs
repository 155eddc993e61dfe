//! Language inference for quiz sources.
//!
//! Two rules coexist and must not be conflated:
//! - markdown sources carry an optional `-quiz-xx` / `-quiz.xx` filename
//!   suffix accepting any two-letter (or two-letter-region) code;
//! - consolidation recognizes a fixed set of codes, preferring a declared
//!   `meta.language` over a `-xx` suffix on the file stem.

use regex::Regex;
use std::sync::LazyLock;

/// Fallback language when nothing can be inferred.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Codes the consolidator recognizes, in declaration order.
pub const KNOWN_LANGUAGES: &[&str] = &[
    "en", "fr", "es", "it", "ch", "de", "ua", "hi", "ptbr", "tr", "pt", "ja", "vi",
];

static MARKDOWN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-quiz[-.]([a-z]{2}(?:-[A-Za-z]{2})?)").expect("valid regex"));

static STEM_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = KNOWN_LANGUAGES.join("|");
    Regex::new(&format!("(?i)-({alternatives})$")).expect("valid regex")
});

/// Derive a language code from a markdown source path.
///
/// Matches a `-quiz-xx` or `-quiz.xx` marker in the file name, lowercased;
/// defaults to [`DEFAULT_LANGUAGE`].
pub fn language_from_markdown_source(source: &str) -> String {
    let name = source.rsplit('/').next().unwrap_or(source);
    MARKDOWN_SUFFIX
        .captures(name)
        .map(|caps| caps[1].to_lowercase())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Infer the language of an already-parsed document.
///
/// Precedence: recognized declared language, then a known `-xx` suffix on
/// the file stem, then [`DEFAULT_LANGUAGE`]. The order is load-bearing and
/// must not be swapped.
pub fn infer_language(declared: Option<&str>, file_stem: &str) -> String {
    if let Some(declared) = declared {
        let normalized = declared.trim().to_lowercase();
        if KNOWN_LANGUAGES.contains(&normalized.as_str()) {
            return normalized;
        }
    }
    STEM_SUFFIX
        .captures(file_stem)
        .map(|caps| caps[1].to_lowercase())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}
