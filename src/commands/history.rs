//! `haul history` — show the collection ledger.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::HistoryStore;
use crate::infra::history::HistoryManager;

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Show at most N most recent collections
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Run the history command.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub async fn run(app: &AppContext, args: &HistoryArgs) -> Result<ExitCode> {
    let history = HistoryManager::new()?;
    let mut records = history.load().await?;

    if let Some(limit) = args.limit {
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
    }

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(ExitCode::SUCCESS);
    }

    if records.is_empty() {
        if !app.output.quiet {
            println!("No collections recorded yet. Collect one: haul collect <host> <image-path>");
        }
        return Ok(ExitCode::SUCCESS);
    }

    println!("Collected images (oldest first):\n");
    for record in &records {
        println!(
            "  {}  {:<24} {:<10} {}",
            record.collected_at.format("%Y-%m-%d %H:%M:%S"),
            record.host,
            record.transport.to_string(),
            record.image
        );
    }
    Ok(ExitCode::SUCCESS)
}
