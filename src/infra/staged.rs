//! Infrastructure implementation of the `Transport` port for the staged cache.
//!
//! Build hosts configured for staged transport push finished artifacts into
//! the controller's cache; collection is then a local move into the store.

use std::path::PathBuf;

use crate::application::ports::{FetchSpec, Transport};
use crate::domain::error::TransferError;
use crate::domain::host::staged_source;
use crate::domain::settings::TransportKind;
use crate::infra::fs::move_file;

/// Moves images out of `<cache_root>/hosts/<host>/files/`.
pub struct StagedTransport {
    cache_root: PathBuf,
}

impl StagedTransport {
    #[must_use]
    pub fn new(cache_root: PathBuf) -> Self {
        Self { cache_root }
    }
}

impl Transport for StagedTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Staged
    }

    fn describe(&self, spec: &FetchSpec<'_>) -> String {
        staged_source(&self.cache_root, spec.host, spec.path)
            .display()
            .to_string()
    }

    async fn fetch(&self, spec: &FetchSpec<'_>) -> Result<PathBuf, TransferError> {
        let source = staged_source(&self.cache_root, spec.host, spec.path);
        if !source.is_file() {
            return Err(TransferError::SourceMissing(source.display().to_string()));
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| TransferError::SourceMissing(source.display().to_string()))?
            .to_owned();
        let destination = spec.dest_dir.join(file_name);

        // Image files can be multiple GB; keep the copy fallback off the
        // async executor.
        let src = source.clone();
        let dest = destination.clone();
        tokio::task::spawn_blocking(move || move_file(&src, &dest))
            .await
            .map_err(|e| TransferError::Interrupted(format!("move task panicked: {e}")))?
            .map_err(|e| TransferError::Failed {
                code: 1,
                detail: format!("{e:#}"),
            })?;

        Ok(destination)
    }
}
