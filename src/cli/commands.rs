use super::*;
use crate::core::{Config, Indexer, RunSummary, UNINDEXED_FILE};
use anyhow::Result;
use tracing::info;

pub fn run(cli: &Cli) -> Result<RunSummary> {
    let config_path = Config::resolve_path(cli.config.as_deref());
    info!("Loading configuration from {:?}", config_path);

    let config = Config::load(&config_path)?;
    config.validate_root()?;

    let indexer = Indexer::new(config);
    info!("Using Zettelkasten at {:?}", indexer.config().root());

    let summary = indexer.run()?;
    print_summary(&summary);
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("\n=== Index Summary ===");
    println!("Notes scanned: {}", summary.notes_scanned);
    println!("Index files: {}", summary.index_files);
    println!("Linked notes: {}", summary.links_found);
    println!("Unindexed notes: {} (see {})", summary.unindexed.len(), UNINDEXED_FILE);
    println!("Tags added: {}", summary.tags_added);

    if summary.has_errors() {
        println!("\nErrors:");
        for (path, error) in &summary.errors {
            println!("  - {}: {}", path, error);
        }
    }
}
