//! Shared helpers for CLI integration tests.

use std::fs;
use std::path::Path;

/// Write `content` at `path`, creating parent directories first.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Generate sample quiz markdown with the given number of single-answer
/// questions.
#[allow(dead_code)]
pub fn sample_quiz_md(title: &str, questions: usize) -> String {
    let mut md = format!("## {title}\n\nA short practice quiz.\n");
    for i in 1..=questions {
        md.push_str(&format!(
            "\n#### {i}. Question number {i}?\n- [x] right-{i}\n- [ ] wrong-{i}\n"
        ));
    }
    md
}
