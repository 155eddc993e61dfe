//! Discovery of quiz sources under a root directory.
//!
//! The walkers only hand back file lists; reading and parsing stay with
//! the commands.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directories never descended into.
const SKIP_DIRS: &[&str] = &[".git", "node_modules", ".next", ".turbo"];

/// File name of consolidated outputs; excluded from consolidation inputs
/// so re-runs are safe.
pub const AGGREGATE_FILE: &str = "quizz.json";

/// Find `*quiz*.md` sources under `root`, sorted.
pub fn find_markdown_sources(root: &Path, keyword: Option<&str>) -> io::Result<Vec<PathBuf>> {
    find(root, keyword, &|name| name.contains("quiz") && name.ends_with(".md"))
}

/// Find per-language `*quiz*.json` documents under `root`, sorted.
pub fn find_document_sources(root: &Path, keyword: Option<&str>) -> io::Result<Vec<PathBuf>> {
    find(root, keyword, &|name| {
        name.contains("quiz") && name.ends_with(".json") && name != AGGREGATE_FILE
    })
}

/// Find consolidated `quizz.json` documents under `root`, sorted.
pub fn find_aggregates(root: &Path, keyword: Option<&str>) -> io::Result<Vec<PathBuf>> {
    find(root, keyword, &|name| name == AGGREGATE_FILE)
}

/// Root-relative path with `/` separators, as recorded in `meta.source`.
pub fn rel_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

fn find(
    root: &Path,
    keyword: Option<&str>,
    select: &dyn Fn(&str) -> bool,
) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(root, select, &mut files)?;
    if let Some(keyword) = keyword {
        files.retain(|path| path.to_string_lossy().contains(keyword));
    }
    files.sort();
    Ok(files)
}

/// Collect matching files recursively, skipping vendored/tooling trees.
fn collect(dir: &Path, select: &dyn Fn(&str) -> bool, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if path.is_dir() {
            if SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            collect(&path, select, files)?;
        } else if select(&name) {
            files.push(path);
        }
    }
    Ok(())
}
