//! Command-line interface definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Creator identity used when neither `--created-by` nor `SEED_USER_ID` is
/// set; matches the seed user provisioned by the application's migrations.
const DEFAULT_CREATED_BY: &str = "cmiz68drf00004eqsc3izonqy";

/// Quiz seed toolchain
///
/// Turns markdown question banks into JSON seed documents, merges
/// per-language siblings into one document per quiz, and submits the
/// results to a seed endpoint.
#[derive(Parser)]
#[command(name = "quizzy-seed")]
#[command(about = "Generate, consolidate and upload quiz seed JSON", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one JSON document per quiz markdown file
    Generate(GenerateArgs),

    /// Merge per-language quiz JSON files into one quizz.json per directory
    Consolidate(ConsolidateArgs),

    /// Submit consolidated quizz.json documents to a remote endpoint
    Upload(UploadArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Root folder to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output folder base (defaults to the root)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only process files whose path contains this substring
    #[arg(long = "match")]
    pub keyword: Option<String>,

    /// Rewrite existing JSON files
    #[arg(long)]
    pub overwrite: bool,

    /// Preview without writing
    #[arg(long)]
    pub dry_run: bool,

    /// createdById to stamp on quizzes (default: SEED_USER_ID, then the
    /// built-in seed identity)
    #[arg(long)]
    pub created_by: Option<String>,
}

#[derive(Args)]
pub struct ConsolidateArgs {
    /// Root folder to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output root (defaults to the root)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only include paths containing this substring
    #[arg(long = "match")]
    pub keyword: Option<String>,

    /// Rewrite existing quizz.json files
    #[arg(long)]
    pub overwrite: bool,

    /// Preview without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Fallback createdById when a base document carries none
    #[arg(long)]
    pub created_by: Option<String>,
}

#[derive(Args)]
pub struct UploadArgs {
    /// Root folder to scan for quizz.json documents
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Only include paths containing this substring
    #[arg(long = "match")]
    pub keyword: Option<String>,

    /// Seed endpoint accepting multipart submissions
    #[arg(long)]
    pub endpoint: String,

    /// List would-be submissions without sending anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Resolve the creator identity: flag, then SEED_USER_ID, then the default.
pub fn resolve_created_by(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("SEED_USER_ID").ok())
        .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string())
}
