//! Per-host settings from the registry, and the transport selection they drive.

use serde::{Deserialize, Serialize};

/// Transport strategy for collecting an image from a build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Move the artifact out of the controller-local staged cache.
    Staged,
    /// Pull the artifact from the build host over rsync+ssh.
    Rsync,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Staged => write!(f, "staged"),
            Self::Rsync => write!(f, "rsync"),
        }
    }
}

/// Settings for a single build host, read from the registry.
///
/// Unknown keys are ignored so registry entries can carry settings for
/// other tooling.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HostSettings {
    /// When `true`, the host pushes finished artifacts into the controller's
    /// staged cache and collection is a local move. When `false` (default),
    /// artifacts are pulled from the host over rsync.
    pub staged_transport: bool,

    /// Remote user for rsync pulls; overrides the global `ssh.user`.
    pub user: Option<String>,
}

impl HostSettings {
    /// The transport these settings select.
    #[must_use]
    pub fn transport(&self) -> TransportKind {
        if self.staged_transport {
            TransportKind::Staged
        } else {
            TransportKind::Rsync
        }
    }
}
