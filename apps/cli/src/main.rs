//! Quiz seed toolchain.
//!
//! Scans a content tree for markdown question banks, emits structured JSON
//! seed documents, consolidates per-language variants, and hands finished
//! documents to the seed endpoint.

mod cli;
mod commands;
mod scan;
mod upload;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Generate(args) => {
            let created_by = cli::resolve_created_by(args.created_by.clone());
            commands::generate::run(&args, &created_by)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Consolidate(args) => {
            let created_by = cli::resolve_created_by(args.created_by.clone());
            commands::consolidate::run(&args, &created_by).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Upload(args) => {
            let failures = commands::upload::run(&args).await?;
            // Transport failures fail the run; a dry run never does.
            if failures > 0 && !args.dry_run {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
