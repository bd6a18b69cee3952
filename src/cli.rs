//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::output::json;

/// Collect built OS images from build hosts into a central store
#[derive(Parser)]
#[command(
    name = "haul",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip interactive prompts, answering with the default
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collect an image from a build host
    Collect(commands::collect::CollectArgs),

    /// Inspect the host settings registry
    #[command(subcommand)]
    Hosts(commands::hosts::HostsCommand),

    /// Show previously collected images
    History(commands::history::HistoryArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Diagnose issues
    Doctor,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command, mapping failures to process exit codes.
    ///
    /// Errors are rendered here — as a JSON error object when `--json` is
    /// active, as an `Error:` line on stderr otherwise — so `main` stays a
    /// one-liner.
    pub async fn run(self) -> ExitCode {
        let json = self.json;
        match self.dispatch().await {
            Ok(code) => code,
            Err(e) => {
                if json {
                    match json::format_error(&format!("{e:#}"), "command_failed") {
                        Ok(obj) => println!("{obj}"),
                        Err(_) => eprintln!("Error: {e:#}"),
                    }
                } else {
                    eprintln!("Error: {e:#}");
                }
                ExitCode::FAILURE
            }
        }
    }

    async fn dispatch(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(ExitCode::SUCCESS);
        }

        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
            yes,
        })?;

        match command {
            Command::Collect(args) => commands::collect::run(&app, &args).await,
            Command::Hosts(cmd) => commands::hosts::run(&app, cmd).await,
            Command::History(args) => commands::history::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Doctor => commands::doctor::run(&app).await,
            // Handled before AppContext construction.
            Command::Version => Ok(ExitCode::SUCCESS),
        }
    }
}
