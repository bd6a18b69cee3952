//! Collection ledger entries persisted in `~/.haul/history.json`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::collect::CollectOutcome;
use crate::domain::settings::TransportKind;

/// One persisted record per successful collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionRecord {
    /// Build host the image was collected from.
    pub host: String,
    /// File name of the image inside the store.
    pub image: String,
    /// Full destination path.
    pub destination: PathBuf,
    /// Transport that performed the transfer.
    pub transport: TransportKind,
    /// SHA-256 hex digest, when it was computed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sha256: Option<String>,
    /// Completion timestamp.
    pub collected_at: DateTime<Utc>,
}

impl From<&CollectOutcome> for CollectionRecord {
    fn from(outcome: &CollectOutcome) -> Self {
        let image = outcome
            .destination
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Self {
            host: outcome.host.clone(),
            image,
            destination: outcome.destination.clone(),
            transport: outcome.transport,
            sha256: outcome.sha256.clone(),
            collected_at: outcome.collected_at,
        }
    }
}
