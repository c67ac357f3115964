//! Image-to-audio mapper commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use tonefind_browse::{BrowseSession, Operation, OperationState};
use tonefind_retrieval::Kind;

use super::{create_client, load_dataset, report_status};
use crate::Cli;

/// Read or replace the image-to-audio mapper.
#[derive(Args)]
pub struct MapperCommand {
    #[command(subcommand)]
    command: MapperSubcommand,
}

#[derive(Subcommand)]
enum MapperSubcommand {
    /// Print the current mapping
    Get,
    /// Replace the mapping wholesale with a mapper file
    Set {
        /// Mapper file to upload
        file: PathBuf,
    },
}

impl MapperCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            MapperSubcommand::Get => self.get(cli).await,
            MapperSubcommand::Set { file } => self.set(cli, file).await,
        }
    }

    async fn get(&self, cli: &Cli) -> anyhow::Result<()> {
        let client = create_client(cli)?;
        let mapper = client.mapper().get().await?;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&mapper)?);
            return Ok(());
        }

        let mut pairs: Vec<_> = mapper.iter().collect();
        pairs.sort();
        for (image, audio) in pairs {
            println!("{image}  -> {audio}");
        }
        println!("{} mappings", mapper.len());
        Ok(())
    }

    async fn set(&self, cli: &Cli, file: &PathBuf) -> anyhow::Result<()> {
        let client = create_client(cli)?;
        let mut session = BrowseSession::new(Kind::Image);

        let data = std::fs::read(file)?;
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("mapper")
            .to_string();

        let token = session.begin_mapper_upload();
        let result = client
            .mapper()
            .replace(data, &filename)
            .await
            .map_err(|e| e.to_string());
        let _ = session.finish_mapper_upload(token, result);
        report_status(&session, Operation::MapperUpload);

        if let OperationState::Failed(_) = session.state(Operation::MapperUpload) {
            anyhow::bail!("mapper upload rejected");
        }

        // The new associations only show up through a fresh listing.
        let _ = load_dataset(&client, &mut session).await;
        report_status(&session, Operation::DatasetLoad);
        Ok(())
    }
}
