//! Build host identifiers and transfer source specs.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::error::HostError;

/// Maximum length of a build host name (RFC 1123 total length).
pub const MAX_HOST_NAME_LEN: usize = 253;

/// Validates a build host name.
///
/// Accepts lowercase RFC-1123 style names: alphanumeric labels separated by
/// `.`, with `-` allowed inside a label. Anything that could be smuggled
/// into an `ssh`/`rsync` invocation as an option or remote-spec separator
/// (leading `-`, whitespace, `@`, `:`) is rejected outright.
///
/// # Errors
///
/// Returns a [`HostError::InvalidName`] describing the first violation.
pub fn validate_host_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(HostError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into())
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.len() > MAX_HOST_NAME_LEN {
        return invalid("name exceeds 253 characters");
    }
    if name.starts_with('-') {
        return invalid("name must not start with '-'");
    }
    for label in name.split('.') {
        if label.is_empty() {
            return invalid("empty label (leading, trailing, or doubled '.')");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return invalid("label must not start or end with '-'");
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return invalid("only lowercase alphanumerics, '-' and '.' are allowed");
        }
    }
    Ok(())
}

/// Builds the rsync remote source spec `user@host:path`.
#[must_use]
pub fn remote_source(user: &str, host: &str, path: &str) -> String {
    format!("{user}@{host}:{path}")
}

/// Builds the staged-cache source path for a build host's artifact.
///
/// Artifacts pushed by a build host land under
/// `<cache_root>/hosts/<host>/files/`, keyed by the artifact's path on the
/// build host with its leading `/` stripped.
#[must_use]
pub fn staged_source(cache_root: &Path, host: &str, path: &str) -> PathBuf {
    cache_root
        .join("hosts")
        .join(host)
        .join("files")
        .join(path.trim_start_matches('/'))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
