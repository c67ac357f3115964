//! Dataset listing and upload commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use tonefind_browse::{BrowseSession, Operation, OperationState};
use tonefind_retrieval::{Kind, UploadFile};

use super::{create_client, load_dataset, print_verbose, report_status};
use crate::Cli;

/// List or extend a dataset.
#[derive(Args)]
pub struct DatasetCommand {
    #[command(subcommand)]
    command: DatasetSubcommand,
}

#[derive(Subcommand)]
enum DatasetSubcommand {
    /// Print the full dataset listing with mapped associations
    List {
        /// Dataset kind (audio or image)
        #[arg(short, long)]
        kind: Kind,
    },
    /// Upload one or more assets into the dataset
    Add {
        /// Dataset kind (audio or image)
        #[arg(short, long)]
        kind: Kind,

        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl DatasetCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            DatasetSubcommand::List { kind } => self.list(cli, *kind).await,
            DatasetSubcommand::Add { kind, files } => self.add(cli, *kind, files).await,
        }
    }

    async fn list(&self, cli: &Cli, kind: Kind) -> anyhow::Result<()> {
        let client = create_client(cli)?;
        let mut session = BrowseSession::new(kind);

        let _ = load_dataset(&client, &mut session).await;
        if let OperationState::Failed(msg) = session.state(Operation::DatasetLoad) {
            anyhow::bail!("{msg}");
        }

        if cli.json {
            println!("{}", serde_json::to_string_pretty(session.store().items())?);
            return Ok(());
        }

        for item in session.store().items() {
            match &item.associated_id {
                Some(assoc) => println!("{}  -> {assoc}", item.id),
                None => println!("{}", item.id),
            }
        }
        println!("{} items", session.store().len());
        Ok(())
    }

    async fn add(&self, cli: &Cli, kind: Kind, files: &[PathBuf]) -> anyhow::Result<()> {
        let client = create_client(cli)?;
        let mut session = BrowseSession::new(kind);

        let mut uploads = Vec::with_capacity(files.len());
        for path in files {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("bad filename: {}", path.display()))?;
            uploads.push(UploadFile::new(filename, std::fs::read(path)?));
        }

        let token = session.begin_dataset_upload();
        let result = client
            .media(kind)
            .add_to_dataset(uploads)
            .await
            .map_err(|e| e.to_string());
        let accepted = result.clone().unwrap_or_default();
        let _ = session.finish_dataset_upload(token, result);
        report_status(&session, Operation::DatasetUpload);

        if let OperationState::Failed(_) = session.state(Operation::DatasetUpload) {
            anyhow::bail!("upload rejected");
        }
        for filename in &accepted {
            print_verbose(cli, &format!("accepted {filename}"));
        }

        // Accepted files only show up through a fresh listing.
        let _ = load_dataset(&client, &mut session).await;
        report_status(&session, Operation::DatasetLoad);
        println!("{} items in dataset", session.store().len());
        Ok(())
    }
}
