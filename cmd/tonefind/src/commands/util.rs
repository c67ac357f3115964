//! Utility functions for CLI commands.

use tonefind_browse::{BrowseSession, Completion, Operation, OperationState, Page};
use tonefind_retrieval::{Client, DatasetEntry, Kind, Mapper};

use crate::Cli;

/// Environment variable overriding the engine base URL.
const BASE_URL_ENV: &str = "TONEFIND_BASE_URL";

/// Creates an engine client from CLI flags and environment.
pub fn create_client(cli: &Cli) -> anyhow::Result<Client> {
    let base_url = match &cli.base_url {
        Some(url) => url.clone(),
        None => std::env::var(BASE_URL_ENV)
            .unwrap_or_else(|_| tonefind_retrieval::DEFAULT_BASE_URL.to_string()),
    };

    Ok(Client::new(base_url)?)
}

/// Loads the dataset listing into the session, pairing the session token
/// with the network call.
///
/// Audio sessions also fetch the image mapper so items carry their album
/// art association; image listings arrive already annotated.
pub async fn load_dataset(client: &Client, session: &mut BrowseSession) -> Completion {
    let token = session.begin_dataset_load();
    let result = fetch_listing(client, session.kind())
        .await
        .map_err(|e| e.to_string());
    session.finish_dataset_load(token, result)
}

async fn fetch_listing(
    client: &Client,
    kind: Kind,
) -> tonefind_retrieval::Result<(Vec<DatasetEntry>, Option<Mapper>)> {
    let entries = client.media(kind).list_dataset().await?;
    let mapper = match kind {
        Kind::Audio => Some(client.mapper().get().await?),
        Kind::Image => None,
    };
    Ok((entries, mapper))
}

/// Prints the status line of an operation, colored by outcome.
pub fn report_status(session: &BrowseSession, op: Operation) {
    let Some(line) = session.status_line(op) else {
        return;
    };
    match session.state(op) {
        OperationState::Failed(_) => print_error(&line),
        OperationState::Succeeded(_) => print_success(&line),
        _ => print_info(&line),
    }
}

/// Prints one page of the merged view.
pub fn print_page(page: &Page, execution_time: Option<f64>, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    if let Some(ms) = execution_time {
        println!("Query executed in {ms:.2}ms");
    }

    if page.items.is_empty() {
        println!("(no items)");
    }
    for item in &page.items {
        let score = match item.score {
            Some(score) => format!("{score:5.1}% match"),
            None => " ".repeat(12),
        };
        let assoc = match &item.item.associated_id {
            Some(id) => format!("  -> {id}"),
            None => String::new(),
        };
        println!("{score}  {}{assoc}", item.item.id);
    }

    println!(
        "Page {} of {} ({} items)",
        page.page_index + 1,
        page.total_pages,
        page.total_items
    );
    Ok(())
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints error message.
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m✗\x1b[0m {}", msg);
}

/// Prints info message.
pub fn print_info(msg: &str) {
    eprintln!("\x1b[34mℹ\x1b[0m {}", msg);
}
