//! Interactive browsing command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Args;

use tonefind_browse::{BrowseSession, Operation, OperationState};
use tonefind_retrieval::{Client, Kind};

use super::{create_client, load_dataset, print_page, report_status};
use crate::Cli;

/// Browse a dataset interactively.
///
/// Commands at the prompt:
///   n / p        next / previous page
///   /TEXT        filter by substring (bare / clears the filter)
///   q FILE       submit FILE as a query asset
///   r            reload the dataset (clears query results)
///   quit         exit
#[derive(Args)]
pub struct BrowseCommand {
    /// Dataset kind (audio or image)
    #[arg(short, long)]
    pub kind: Kind,
}

impl BrowseCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let client = create_client(cli)?;
        let mut session = BrowseSession::new(self.kind);

        let _ = load_dataset(&client, &mut session).await;
        if let OperationState::Failed(msg) = session.state(Operation::DatasetLoad) {
            anyhow::bail!("{msg}");
        }

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            let page = session.page();
            print_page(&page, session.execution_time(), cli.json)?;

            print!("tonefind> ");
            std::io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };

            match line.trim() {
                "" => {}
                "n" | "next" => session.next_page(),
                "p" | "prev" => session.prev_page(),
                "r" | "reload" => {
                    let _ = load_dataset(&client, &mut session).await;
                    report_status(&session, Operation::DatasetLoad);
                    session.acknowledge(Operation::DatasetLoad);
                }
                "quit" | "exit" => break,
                "h" | "help" => print_help(),
                cmd if cmd.starts_with('/') => {
                    session.set_filter(cmd[1..].trim().to_string());
                }
                cmd if cmd.starts_with("q ") => {
                    self.submit_query(&client, &mut session, cmd[2..].trim()).await;
                }
                other => {
                    eprintln!("unknown command: {other} (try 'help')");
                }
            }
        }

        Ok(())
    }

    async fn submit_query(&self, client: &Client, session: &mut BrowseSession, path: &str) {
        let path = PathBuf::from(path);
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("cannot read {}: {e}", path.display());
                return;
            }
        };
        let filename = path
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
        report_status(session, Operation::Query);
        session.acknowledge(Operation::Query);
    }
}

fn print_help() {
    eprintln!("n / p      next / previous page");
    eprintln!("/TEXT      filter by substring; bare / clears the filter");
    eprintln!("q FILE     submit FILE as a query asset");
    eprintln!("r          reload the dataset (clears query results)");
    eprintln!("quit       exit");
}
