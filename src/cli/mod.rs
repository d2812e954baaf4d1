use clap::Parser;
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "zettel-indexer")]
#[command(about = "Find unindexed notes and tag index files in a Zettelkasten")]
#[command(version)]
pub struct Cli {
    /// Path to the JSON configuration file
    ///
    /// Defaults to ./config.json, then <config dir>/zettel-indexer/config.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
