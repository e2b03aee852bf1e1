// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lexmatch::{DictionaryMetadata, DirStore, EngineConfig, Importer, TermMatcher};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{display, Cli, Commands};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env("LEXMATCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).await?;
    let store = Arc::new(
        DirStore::open(&cli.store)
            .await
            .with_context(|| format!("Failed to open store {}", cli.store.display()))?,
    );
    let matcher = TermMatcher::builder(store).config(config).build();
    let importer = Importer::new(matcher.entry_store().clone());

    match cli.command {
        Commands::Import {
            name,
            file,
            title,
            revision,
        } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let metadata = DictionaryMetadata::new(title.unwrap_or_else(|| name.clone()), revision);

            let bar = ProgressBar::new(100);
            bar.set_style(progress_style());
            bar.set_prefix("Importing");
            let report = importer
                .import_json(&name, metadata, &text, |progress| {
                    bar.set_position(u64::from(progress.percent));
                    bar.set_message(progress.phase.to_string());
                })
                .await;
            bar.finish_and_clear();

            let report = report.with_context(|| format!("Import of {} failed", file.display()))?;
            eprintln!(
                "✓ {}: {} entries added, {} skipped, {} buckets written",
                name, report.entries_added, report.entries_skipped, report.buckets_written
            );
        }

        Commands::Lookup { text, limit, json } => {
            if text.is_empty() {
                bail!("Nothing to look up");
            }
            let entries = matcher.lookup(&text).await?;
            let shown = &entries[..entries.len().min(limit)];
            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else {
                display::print_entries(&text, shown);
            }
        }

        Commands::List => {
            let index = matcher.entry_store().dictionary_index().await?;
            display::print_dictionaries(&index);
        }

        Commands::Delete { name } => {
            if !matcher.entry_store().list_dictionaries().await?.contains(&name) {
                eprintln!("⚠️  {} is not installed; removing any leftover buckets", name);
            }
            let deleted = importer.delete_dictionary(&name).await?;
            eprintln!("✓ Deleted {} ({} buckets)", name, deleted);
        }

        Commands::Orphans { cleanup } => {
            let orphans = if cleanup {
                importer.cleanup_orphaned_buckets().await?
            } else {
                importer.find_orphaned_buckets().await?
            };
            display::print_orphans(&orphans, cleanup);
        }
    }

    Ok(())
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    EngineConfig::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos:>3}% {msg}")
        .map(|style| style.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
