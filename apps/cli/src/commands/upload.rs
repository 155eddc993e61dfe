//! `upload`: submit consolidated documents to the seed endpoint.

use crate::cli::UploadArgs;
use crate::scan;
use crate::upload::UploadClient;
use anyhow::{Context, Result};
use std::fs;
use tracing::{error, info};

/// Run the upload pass; returns the number of failed submissions.
pub async fn run(args: &UploadArgs) -> Result<usize> {
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("resolving root {}", args.root.display()))?;

    let files = scan::find_aggregates(&root, args.keyword.as_deref())
        .context("scanning for quizz.json documents")?;
    if files.is_empty() {
        info!("no quizz.json documents found");
        return Ok(0);
    }

    let client = UploadClient::new(&args.endpoint);
    let mut failures = 0usize;

    for path in &files {
        let rel = scan::rel_path(&root, path);

        if args.dry_run {
            info!("[dry] would upload {rel}");
            continue;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                failures += 1;
                error!("[fail] {rel}: {err}");
                continue;
            }
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| scan::AGGREGATE_FILE.to_string());

        match client.upload(&rel, &file_name, bytes).await {
            Ok(()) => info!("[ok] uploaded {rel}"),
            Err(err) => {
                failures += 1;
                error!("[fail] {rel}: {err}");
            }
        }
    }

    if args.dry_run {
        info!("dry run, {} file(s) would be uploaded", files.len());
    } else {
        info!("uploaded {}/{} file(s)", files.len() - failures, files.len());
    }
    Ok(failures)
}
