//! Environment check types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct DoctorChecks {
    /// Transfer tool availability.
    pub tools: ToolChecks,
    /// Image store and staged cache directories.
    pub store: StoreChecks,
    /// SSH identity checks.
    pub ssh: SshChecks,
}

/// Transfer tool checks — rsync and ssh on PATH.
#[derive(Debug, Serialize)]
pub struct ToolChecks {
    /// Whether `rsync` is on PATH.
    pub rsync_found: bool,
    /// Installed rsync version string (e.g. `"3.2.7"`), if found.
    pub rsync_version: Option<String>,
    /// Whether `ssh` is on PATH.
    pub ssh_found: bool,
}

/// Store and cache directory checks.
#[derive(Debug, Serialize)]
pub struct StoreChecks {
    /// Whether the image store root exists.
    pub store_exists: bool,
    /// Whether the image store root is writable.
    pub store_writable: bool,
    /// Whether the staged cache root exists.
    pub cache_exists: bool,
    /// Whether the host settings registry directory exists.
    pub registry_exists: bool,
}

/// SSH identity checks.
#[derive(Debug, Serialize)]
pub struct SshChecks {
    /// Whether an identity file is configured.
    pub identity_configured: bool,
    /// Whether the configured identity file exists.
    pub identity_exists: bool,
    /// Whether the identity file permissions are 0600 (Unix only; always
    /// `true` elsewhere).
    pub identity_permissions_ok: bool,
    /// Whether host key verification is enabled.
    pub strict_host_key_checking: bool,
}

// ── Pure functions ────────────────────────────────────────────────────────────

/// Collect actionable issues from check results.
///
/// Returns a list of human-readable issue strings for any failing checks.
/// Disabled host key checking is a **warning only** and is NOT included in
/// the returned issues list.
#[must_use]
pub fn collect_issues(checks: &DoctorChecks) -> Vec<String> {
    let mut issues = Vec::new();
    if !checks.tools.rsync_found {
        issues.push("rsync is not installed".to_string());
    }
    if !checks.tools.ssh_found {
        issues.push("ssh is not installed".to_string());
    }
    if !checks.store.store_writable {
        issues.push("image store directory is not writable".to_string());
    }
    if checks.ssh.identity_configured && !checks.ssh.identity_exists {
        issues.push("configured ssh identity file does not exist".to_string());
    }
    if checks.ssh.identity_exists && !checks.ssh.identity_permissions_ok {
        issues.push("ssh identity file permissions are too open (want 0600)".to_string());
    }
    issues
}
