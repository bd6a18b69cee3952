//! `haul hosts` — inspect the host settings registry.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::HostRegistry;
use crate::domain::host::validate_host_name;
use crate::infra::registry::YamlHostRegistry;

/// Hosts subcommands.
#[derive(Subcommand)]
pub enum HostsCommand {
    /// List registered build hosts
    List,
    /// Show one host's settings
    Show {
        /// Build host name
        host: String,
    },
}

/// Run the hosts command.
///
/// # Errors
///
/// Returns an error if the registry cannot be read.
pub async fn run(app: &AppContext, cmd: HostsCommand) -> Result<ExitCode> {
    let registry = YamlHostRegistry::new(app.paths.registry_root.clone());
    match cmd {
        HostsCommand::List => list_hosts(app, &registry).await,
        HostsCommand::Show { host } => show_host(app, &registry, &host).await,
    }
}

async fn list_hosts(app: &AppContext, registry: &impl HostRegistry) -> Result<ExitCode> {
    let hosts = registry.hosts().await?;

    if app.is_json() {
        let mut entries = Vec::new();
        for host in &hosts {
            let settings = registry.settings(host).await?;
            entries.push(serde_json::json!({
                "host": host,
                "transport": settings.transport().to_string(),
            }));
        }
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(ExitCode::SUCCESS);
    }

    if hosts.is_empty() {
        if !app.output.quiet {
            println!(
                "No hosts registered. Add one: {}/<host>.yaml",
                app.paths.registry_root.display()
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    println!("Registered build hosts:\n");
    for host in &hosts {
        let settings = registry.settings(host).await?;
        println!("  {host:<32} {}", settings.transport());
    }
    Ok(ExitCode::SUCCESS)
}

async fn show_host(
    app: &AppContext,
    registry: &impl HostRegistry,
    host: &str,
) -> Result<ExitCode> {
    validate_host_name(host)?;
    let settings = registry.settings(host).await?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(ExitCode::SUCCESS);
    }

    app.output.kv("Host:", host);
    app.output.kv("Transport:", &settings.transport().to_string());
    app.output.kv(
        "User:",
        settings.user.as_deref().unwrap_or(&app.config.ssh.user),
    );
    Ok(ExitCode::SUCCESS)
}
