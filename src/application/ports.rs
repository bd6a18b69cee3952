//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::config::HaulConfig;
use crate::domain::doctor::DoctorChecks;
use crate::domain::error::TransferError;
use crate::domain::history::CollectionRecord;
use crate::domain::settings::{HostSettings, TransportKind};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Transport Port ────────────────────────────────────────────────────────────

/// Everything a transport needs to fetch one image.
#[derive(Debug, Clone)]
pub struct FetchSpec<'a> {
    /// Build host the image came from.
    pub host: &'a str,
    /// Path of the image on the build host.
    pub path: &'a str,
    /// Destination directory on the controller (already created).
    pub dest_dir: &'a Path,
    /// Remote user for the pull (ignored by local transports).
    pub user: &'a str,
}

/// A transfer strategy: staged-cache move or remote pull.
///
/// `fetch` returns the full path of the collected file inside `dest_dir`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Which strategy this transport implements.
    fn kind(&self) -> TransportKind;

    /// The source spec this transport would fetch from — a cache path for
    /// the staged transport, `user@host:path` for rsync. Used for logging
    /// and recorded in the collection outcome.
    fn describe(&self, spec: &FetchSpec<'_>) -> String;

    /// Fetch the image into `spec.dest_dir`.
    async fn fetch(&self, spec: &FetchSpec<'_>) -> Result<PathBuf, TransferError>;
}

// ── Host Registry Port ────────────────────────────────────────────────────────

/// Per-host settings lookup.
#[allow(async_fn_in_trait)]
pub trait HostRegistry {
    /// Settings for the given host. A host with no registry entry gets
    /// `HostSettings::default()`; a malformed entry is an error.
    async fn settings(&self, host: &str) -> Result<HostSettings>;

    /// All hosts with a registry entry, sorted by name.
    async fn hosts(&self) -> Result<Vec<String>>;
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Abstracts persistence of [`HaulConfig`].
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<HaulConfig>;

    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &HaulConfig) -> Result<()>;

    /// The path the configuration is stored at.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

// ── History Port ──────────────────────────────────────────────────────────────

/// Abstracts the collection ledger.
#[allow(async_fn_in_trait)]
pub trait HistoryStore {
    /// Append a record to the ledger.
    async fn append(&self, record: CollectionRecord) -> Result<()>;

    /// Load all records, oldest first.
    async fn load(&self) -> Result<Vec<CollectionRecord>>;
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Abstracts file hashing operations.
pub trait FileHasher {
    /// Compute the SHA-256 hex digest of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

/// Minimal local filesystem operations used by application services.
pub trait LocalFs {
    /// Whether the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create the directory and all missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

// ── Doctor Port ───────────────────────────────────────────────────────────────

/// Abstracts environment probing so the doctor service can be tested with
/// mocks.
#[allow(async_fn_in_trait)]
pub trait DoctorProbe {
    /// Run all environment probes and return the aggregated results.
    async fn probe_all(&self) -> Result<DoctorChecks>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
