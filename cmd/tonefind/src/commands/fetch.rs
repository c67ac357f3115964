//! Raw asset download command.

use std::path::PathBuf;

use clap::Args;

use tonefind_retrieval::Kind;

use super::{create_client, print_success};
use crate::Cli;

/// Download a raw dataset asset.
#[derive(Args)]
pub struct FetchCommand {
    /// Filename of the dataset asset
    pub filename: String,

    /// Dataset kind (audio or image)
    #[arg(short, long)]
    pub kind: Kind,

    /// Output file (default: the asset's filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl FetchCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let client = create_client(cli)?;
        let data = client.media(self.kind).fetch_asset(&self.filename).await?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.filename));
        std::fs::write(&output, &data)?;

        print_success(&format!("{} ({} bytes)", output.display(), data.len()));
        Ok(())
    }
}
