//! `consolidate`: merge per-language quiz JSON files into one document per
//! directory.

use crate::cli::ConsolidateArgs;
use crate::scan::{self, AGGREGATE_FILE};
use anyhow::{Context, Result};
use quiz_core::{consolidate, Consolidated, ConsolidateOptions, QuizDocument, SourceDocument};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub async fn run(args: &ConsolidateArgs, fallback_created_by: &str) -> Result<()> {
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("resolving root {}", args.root.display()))?;
    let output_root = args.output.clone().unwrap_or_else(|| root.clone());

    let files = scan::find_document_sources(&root, args.keyword.as_deref())
        .context("scanning for quiz JSON files")?;
    if files.is_empty() {
        info!("no quiz JSON files found");
        return Ok(());
    }

    let groups = group_by_directory(files);
    let mut written = 0usize;
    let mut failed = 0usize;

    for (directory, group_files) in groups {
        let rel_dir = scan::rel_path(&root, &directory);
        let output_file = output_root.join(&rel_dir).join(AGGREGATE_FILE);

        if output_file.exists() && !args.overwrite {
            info!("[skip] {rel_dir}/{AGGREGATE_FILE} (exists)");
            continue;
        }

        let options = ConsolidateOptions {
            rel_dir: rel_dir.clone(),
            dir_name: directory
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            fallback_created_by: fallback_created_by.to_string(),
        };

        match build_group(&group_files, &options).await {
            Ok(consolidated) => {
                let set_count = consolidated.document.quizz.sets.len();
                if consolidated.normalized_urls > 0 {
                    debug!(
                        "[{rel_dir}] normalized {} attachment URL(s)",
                        consolidated.normalized_urls
                    );
                }
                if args.dry_run {
                    info!("[dry] would write {} ({set_count} set(s))", output_file.display());
                } else if let Err(err) = write_document(&output_file, &consolidated) {
                    failed += 1;
                    error!("[fail] {rel_dir}: {err:#}");
                } else {
                    written += 1;
                    info!("[ok] {rel_dir}/{AGGREGATE_FILE} ({set_count} set(s))");
                }
            }
            Err(err) => {
                // One bad group never aborts the batch.
                failed += 1;
                error!("[fail] {rel_dir}: {err:#}");
            }
        }
    }

    info!("done, wrote {written} file(s), {failed} group(s) failed");
    Ok(())
}

fn group_by_directory(files: Vec<PathBuf>) -> BTreeMap<PathBuf, Vec<PathBuf>> {
    let mut grouped: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let directory = file.parent().map(Path::to_path_buf).unwrap_or_default();
        grouped.entry(directory).or_default().push(file);
    }
    grouped
}

/// Read and decode every document of one group concurrently, then merge.
async fn build_group(files: &[PathBuf], options: &ConsolidateOptions) -> Result<Consolidated> {
    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let path = path.clone();
        handles.push(tokio::spawn(async move {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let document: QuizDocument = serde_json::from_str(&text)
                .with_context(|| format!("decoding {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            anyhow::Ok(SourceDocument { file_name, document })
        }));
    }

    let mut documents = Vec::with_capacity(handles.len());
    for handle in handles {
        documents.push(handle.await.context("document read task panicked")??);
    }

    Ok(consolidate(documents, options)?)
}

fn write_document(output_file: &Path, consolidated: &Consolidated) -> Result<()> {
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json =
        serde_json::to_string_pretty(&consolidated.document).context("serializing aggregate")?;
    fs::write(output_file, json)
        .with_context(|| format!("writing {}", output_file.display()))?;
    Ok(())
}
