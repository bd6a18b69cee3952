//! Haul CLI - Collect built OS images from build hosts into a central store

use std::process::ExitCode;

use clap::Parser;

use haul_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    Cli::parse().run().await
}
