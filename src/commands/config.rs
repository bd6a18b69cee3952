//! `haul config` — show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize as _;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::{validate_config_key, validate_config_value};

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Print the configuration file path
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or saved.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
        ConfigCommand::Path => {
            println!("{}", app.config_store.path()?.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!(
        "  {}",
        format!("Configuration ({})", path.display()).style(app.output.styles.header)
    );
    println!();
    println!("  {:<34} {}", "store.root:", display_opt_path(config.store.root.as_deref()));
    println!("  {:<34} {}", "ssh.user:", config.ssh.user);
    println!(
        "  {:<34} {}",
        "ssh.identity_file:",
        display_opt_path(config.ssh.identity_file.as_deref())
    );
    println!(
        "  {:<34} {}",
        "ssh.strict_host_key_checking:", config.ssh.strict_host_key_checking
    );
    println!("  {:<34} {}", "transfer.timeout_secs:", config.transfer.timeout_secs);
    println!("  {:<34} {}", "transfer.attempts:", config.transfer.attempts);
    println!(
        "  {:<34} {}",
        "transfer.retry_delay_secs:", config.transfer.retry_delay_secs
    );
    println!();
    println!("  {}", "Environment:".style(app.output.styles.bold));
    println!(
        "    {:<32} {}",
        "HAUL_CONFIG:",
        std::env::var("HAUL_CONFIG").unwrap_or_else(|_| "(not set)".to_string())
    );
    println!(
        "    {:<32} {}",
        "NO_COLOR:",
        std::env::var("NO_COLOR").unwrap_or_else(|_| "(not set)".to_string())
    );
    println!();
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;

    let mut config = config_service::load_config(&app.config_store)?;
    config_service::apply_setting(&mut config, key, value)?;
    config_service::save_config(&app.config_store, &config)?;

    app.output.success(&format!("Set {key} = {value}"));
    Ok(ExitCode::SUCCESS)
}

fn display_opt_path(path: Option<&std::path::Path>) -> String {
    path.map_or_else(|| "(default)".to_string(), |p| p.display().to_string())
}
