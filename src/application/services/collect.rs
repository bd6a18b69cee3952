//! Application service — image collection use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::ports::{
    FetchSpec, FileHasher, HistoryStore, HostRegistry, LocalFs, ProgressReporter, Transport,
};
use crate::domain::collect::{CollectOutcome, CollectRequest, TransportChoice};
use crate::domain::config::TransferConfig;
use crate::domain::history::CollectionRecord;
use crate::domain::host::validate_host_name;
use crate::domain::settings::TransportKind;

/// Parameters for [`collect_image`] beyond the injected ports.
pub struct CollectOptions<'a, R: ProgressReporter> {
    /// Progress sink for step/retry/success lines.
    pub reporter: &'a R,
    /// The collection request.
    pub request: &'a CollectRequest,
    /// Remote user when the host settings don't override it.
    pub default_user: &'a str,
    /// Timeout and retry policy.
    pub retry: &'a TransferConfig,
}

/// Collect one image from a build host into the store directory.
///
/// The store directory is created before the registry lookup, so a host
/// with broken settings still leaves a usable store behind. Transport
/// selection follows the host's registry settings unless the request
/// carries an explicit override.
///
/// # Errors
///
/// Returns an error if the host name is invalid, the registry entry is
/// malformed, or the transfer fails after exhausting the retry policy.
pub async fn collect_image(
    registry: &impl HostRegistry,
    staged: &impl Transport,
    rsync: &impl Transport,
    fs: &impl LocalFs,
    hasher: &impl FileHasher,
    history: &impl HistoryStore,
    opts: CollectOptions<'_, impl ProgressReporter>,
) -> Result<CollectOutcome> {
    let CollectOptions {
        reporter,
        request,
        default_user,
        retry,
    } = opts;

    validate_host_name(&request.host)?;

    fs.create_dir_all(&request.store_dir).with_context(|| {
        format!("preparing image store {}", request.store_dir.display())
    })?;

    let settings = registry.settings(&request.host).await?;
    let kind = match request.transport {
        TransportChoice::Auto => settings.transport(),
        TransportChoice::Staged => TransportKind::Staged,
        TransportChoice::Rsync => TransportKind::Rsync,
    };
    let user = settings.user.as_deref().unwrap_or(default_user);

    let spec = FetchSpec {
        host: &request.host,
        path: &request.image_path,
        dest_dir: &request.store_dir,
        user,
    };

    let (source, destination, attempts) = match kind {
        TransportKind::Staged => {
            reporter.step(&format!(
                "collecting '{}' from staged cache",
                request.image_path
            ));
            fetch_with_retry(staged, &spec, reporter, retry).await?
        }
        TransportKind::Rsync => {
            reporter.step(&format!(
                "collecting '{}' from {} via rsync",
                request.image_path, request.host
            ));
            fetch_with_retry(rsync, &spec, reporter, retry).await?
        }
    };

    let sha256 = if request.checksum {
        Some(
            hasher
                .sha256_file(&destination)
                .with_context(|| format!("hashing {}", destination.display()))?,
        )
    } else {
        None
    };

    let outcome = CollectOutcome {
        host: request.host.clone(),
        transport: kind,
        source,
        destination,
        attempts,
        sha256,
        collected_at: Utc::now(),
    };

    history
        .append(CollectionRecord::from(&outcome))
        .await
        .context("recording collection in history")?;

    reporter.success(&format!(
        "collected {} into {}",
        outcome
            .destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.destination.display().to_string()),
        request.store_dir.display()
    ));

    Ok(outcome)
}

/// Run one transport under the retry policy.
///
/// Retryable failures are retried up to `retry.attempts` total attempts
/// with exponential backoff; anything else surfaces immediately.
async fn fetch_with_retry(
    transport: &impl Transport,
    spec: &FetchSpec<'_>,
    reporter: &impl ProgressReporter,
    retry: &TransferConfig,
) -> Result<(String, std::path::PathBuf, u32)> {
    let source = transport.describe(spec);
    let max_attempts = retry.attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match transport.fetch(spec).await {
            Ok(destination) => return Ok((source, destination, attempt)),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let delay = retry.delay_after(attempt);
                reporter.warn(&format!(
                    "transfer failed ({err}); retrying in {}s [attempt {}/{}]",
                    delay.as_secs(),
                    attempt + 1,
                    max_attempts
                ));
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                return Err(anyhow::Error::from(err)
                    .context(format!("fetching {source} (attempt {attempt}/{max_attempts})")));
            }
        }
    }
}
