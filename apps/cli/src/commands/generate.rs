//! `generate`: turn quiz markdown files into per-file JSON documents.

use crate::cli::GenerateArgs;
use crate::scan;
use anyhow::{Context, Result};
use quiz_core::{parse_quiz, ParseOptions};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
struct Summary {
    files: usize,
    written: usize,
    skipped: usize,
    warnings: usize,
}

pub fn run(args: &GenerateArgs, created_by: &str) -> Result<()> {
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("resolving root {}", args.root.display()))?;
    let output_root = args.output.clone().unwrap_or_else(|| root.clone());

    let files = scan::find_markdown_sources(&root, args.keyword.as_deref())
        .context("scanning for quiz markdown files")?;
    if files.is_empty() {
        info!("no quiz markdown files found");
        return Ok(());
    }

    let mut summary = Summary {
        files: files.len(),
        ..Summary::default()
    };

    for path in &files {
        let rel = scan::rel_path(&root, path);

        // Decode failure is fatal for this file only; the batch continues.
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                summary.warnings += 1;
                error!("failed to read {rel}: {err}");
                continue;
            }
        };

        let document = parse_quiz(
            &content,
            &ParseOptions {
                source: rel.clone(),
                created_by: created_by.to_string(),
            },
        );
        let output_file = output_root.join(Path::new(&rel).with_extension("json"));

        if !args.overwrite && !args.dry_run && output_file.exists() {
            summary.skipped += 1;
            info!("skipping existing file: {}", output_file.display());
            continue;
        }

        if args.dry_run {
            info!("would write: {}", output_file.display());
        } else if let Err(err) = write_document(&output_file, &document) {
            summary.warnings += 1;
            error!("failed to write {rel}: {err:#}");
            continue;
        } else {
            info!(
                "wrote {} ({} questions)",
                output_file.display(),
                document.quizz.questions.len()
            );
            summary.written += 1;
        }

        summary.warnings += document.meta.warnings.len();
        for warning in &document.meta.warnings {
            warn!("[{rel}] {warning}");
        }
    }

    info!(
        "processed {} files | written: {} | skipped: {} | warnings: {}",
        summary.files, summary.written, summary.skipped, summary.warnings
    );
    Ok(())
}

fn write_document(output_file: &Path, document: &quiz_core::QuizDocument) -> Result<()> {
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(document).context("serializing document")?;
    fs::write(output_file, json).with_context(|| format!("writing {}", output_file.display()))?;
    Ok(())
}
