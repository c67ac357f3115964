//! Query submission command.

use std::path::PathBuf;

use clap::Args;

use tonefind_browse::{BrowseSession, Operation, OperationState};
use tonefind_retrieval::Kind;

use super::{create_client, load_dataset, print_page, print_verbose, report_status};
use crate::Cli;

/// Submit a query asset and show the merged ranked view.
#[derive(Args)]
pub struct QueryCommand {
    /// Query asset: an audio recording or an example image
    pub file: PathBuf,

    /// Dataset to query (audio or image)
    #[arg(short, long)]
    pub kind: Kind,
}

impl QueryCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let client = create_client(cli)?;
        let mut session = BrowseSession::new(self.kind);

        print_verbose(
            cli,
            &format!("loading {} dataset from {}", self.kind, client.base_url()),
        );
        let _ = load_dataset(&client, &mut session).await;
        if let OperationState::Failed(msg) = session.state(Operation::DatasetLoad) {
            anyhow::bail!("{msg}");
        }

        let data = std::fs::read(&self.file)?;
        let filename = self
            .file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("query")
            .to_string();

        let token = session.begin_query();
        let result = client
            .media(self.kind)
            .submit_query(data, &filename)
            .await
            .map_err(|e| e.to_string());
        let _ = session.finish_query(token, result);
        report_status(&session, Operation::Query);

        let page = session.page();
        print_page(&page, session.execution_time(), cli.json)
    }
}
