//! `haul collect` — collect one image from a build host into the store.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::app::AppContext;
use crate::application::services::collect::{CollectOptions, collect_image};
use crate::domain::collect::{CollectRequest, TransportChoice};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::StdFs;
use crate::infra::history::HistoryManager;
use crate::infra::registry::YamlHostRegistry;
use crate::infra::rsync::RsyncTransport;
use crate::infra::staged::StagedTransport;
use crate::output::{Reporter, SpinnerReporter, TerminalReporter};

/// Arguments for the collect command.
#[derive(Args)]
pub struct CollectArgs {
    /// Build host to collect from
    pub host: String,

    /// Path of the image on the build host
    pub image_path: String,

    /// Destination directory (defaults to the configured store root)
    #[arg(long = "to", value_name = "DIR")]
    pub to: Option<PathBuf>,

    /// Transport selection
    #[arg(long, value_enum, default_value = "auto")]
    pub transport: TransportArg,

    /// Compute a SHA-256 digest of the collected image
    #[arg(long)]
    pub checksum: bool,
}

/// Transport selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// Follow the host's registry settings (default).
    Auto,
    /// Force the staged-cache move.
    Staged,
    /// Force the rsync pull.
    Rsync,
}

impl From<TransportArg> for TransportChoice {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Auto => Self::Auto,
            TransportArg::Staged => Self::Staged,
            TransportArg::Rsync => Self::Rsync,
        }
    }
}

/// Run the collect command.
///
/// # Errors
///
/// Returns an error if the transfer fails or the destination cannot be
/// prepared.
pub async fn run(app: &AppContext, args: &CollectArgs) -> Result<ExitCode> {
    let store_dir = args
        .to
        .clone()
        .unwrap_or_else(|| app.paths.store_root.clone());

    // Refuse to silently clobber an already-collected image.
    if let Some(name) = std::path::Path::new(&args.image_path).file_name() {
        let dest = store_dir.join(name);
        if dest.exists()
            && !app.confirm(
                &format!("{} already exists in the store. Overwrite?", dest.display()),
                false,
            )?
        {
            app.output.warn("aborted: destination already exists");
            return Ok(ExitCode::FAILURE);
        }
    }

    let request = CollectRequest {
        host: args.host.clone(),
        image_path: args.image_path.clone(),
        store_dir,
        transport: args.transport.into(),
        checksum: args.checksum,
    };

    let runner = TokioCommandRunner::new(app.config.transfer.timeout());
    let staged = StagedTransport::new(app.paths.cache_root.clone());
    let rsync = RsyncTransport::new(&runner, &app.config.ssh, app.config.transfer.timeout());
    let registry = YamlHostRegistry::new(app.paths.registry_root.clone());
    let history = HistoryManager::new()?;

    // In JSON mode stdout must stay machine-readable, so progress lines are
    // silenced entirely.
    let silent = crate::output::OutputContext::new(true, true);
    let reporter = if app.is_json() {
        Reporter::Terminal(TerminalReporter::new(&silent))
    } else if app.output.show_progress() {
        Reporter::Spinner(SpinnerReporter::new("collecting..."))
    } else {
        Reporter::Terminal(TerminalReporter::new(&app.output))
    };

    let result = collect_image(
        &registry,
        &staged,
        &rsync,
        &StdFs,
        &StdFs,
        &history,
        CollectOptions {
            reporter: &reporter,
            request: &request,
            default_user: &app.config.ssh.user,
            retry: &app.config.transfer,
        },
    )
    .await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            reporter.clear();
            return Err(e);
        }
    };

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        app.output.kv("Host:", &outcome.host);
        app.output.kv("Transport:", &outcome.transport.to_string());
        app.output.kv("Source:", &outcome.source);
        app.output
            .kv("Stored:", &outcome.destination.display().to_string());
        if let Some(sha256) = &outcome.sha256 {
            app.output.kv("SHA-256:", sha256);
        }
        if outcome.attempts > 1 {
            app.output
                .info(&format!("transfer needed {} attempts", outcome.attempts));
        }
    }

    Ok(ExitCode::SUCCESS)
}
