//! llmstxt CLI: concatenate a manifest of markdown documents into `llms.txt`.
//!
//! Reads the ordered manifest from `llms.toml` (or the built-in defaults),
//! and writes a single reference document for AI coding agents.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::MultiProgress;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let progress = MultiProgress::new();
    commands::init_tracing(&cli, &progress);
    commands::run(cli, progress).await
}
