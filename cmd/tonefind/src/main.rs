//! tonefind CLI - browse and query the tonefind similarity-retrieval engine.

use clap::{Parser, Subcommand};

mod commands;

use commands::{BrowseCommand, DatasetCommand, FetchCommand, MapperCommand, QueryCommand};

/// tonefind CLI - query-by-example retrieval over audio and album art.
///
/// Submits query assets (hummed audio, example images) to the retrieval
/// engine and presents the ranked matches merged into a paginated,
/// searchable view of the dataset.
#[derive(Parser)]
#[command(name = "tonefind")]
#[command(about = "Similarity-retrieval engine CLI tool")]
#[command(version)]
pub struct Cli {
    /// Engine base URL (default: $TONEFIND_BASE_URL or http://localhost:5000)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a query asset and show the merged ranked view
    Query(QueryCommand),
    /// List or extend a dataset
    Dataset(DatasetCommand),
    /// Read or replace the image-to-audio mapper
    Mapper(MapperCommand),
    /// Download a raw dataset asset
    Fetch(FetchCommand),
    /// Browse a dataset interactively
    Browse(BrowseCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    }

    match &cli.command {
        Commands::Query(cmd) => cmd.run(&cli).await,
        Commands::Dataset(cmd) => cmd.run(&cli).await,
        Commands::Mapper(cmd) => cmd.run(&cli).await,
        Commands::Fetch(cmd) => cmd.run(&cli).await,
        Commands::Browse(cmd) => cmd.run(&cli).await,
    }
}
