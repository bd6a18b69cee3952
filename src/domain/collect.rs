//! Request and outcome types for the collect use-case.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::settings::TransportKind;

/// Explicit transport selection from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportChoice {
    /// Let the host's registry settings decide (default).
    #[default]
    Auto,
    /// Force the staged-cache move.
    Staged,
    /// Force the rsync pull.
    Rsync,
}

/// A single image collection request.
#[derive(Debug, Clone)]
pub struct CollectRequest {
    /// Build host the image came from.
    pub host: String,
    /// Path of the image on the build host (absolute), also the key under
    /// the staged cache.
    pub image_path: String,
    /// Destination directory on the controller.
    pub store_dir: PathBuf,
    /// Transport override from the command line.
    pub transport: TransportChoice,
    /// Compute a SHA-256 digest of the collected file.
    pub checksum: bool,
}

/// Result of a successful collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectOutcome {
    /// Build host the image was collected from.
    pub host: String,
    /// Transport that performed the transfer.
    pub transport: TransportKind,
    /// Source spec the transport fetched from (remote spec or cache path).
    pub source: String,
    /// Full path of the collected file in the store.
    pub destination: PathBuf,
    /// Number of attempts the transfer took (1 = no retries).
    pub attempts: u32,
    /// SHA-256 hex digest, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    /// Completion timestamp.
    pub collected_at: DateTime<Utc>,
}
