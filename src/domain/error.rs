//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Transfer errors ───────────────────────────────────────────────────────────

/// Errors raised while fetching an image through a transport.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("transfer tool not available: {0}")]
    ToolMissing(String),

    #[error("source file not found: {0}")]
    SourceMissing(String),

    #[error("build host unreachable: {0}")]
    Unreachable(String),

    #[error("transfer timed out: {0}")]
    Timeout(String),

    #[error("transfer interrupted: {0}")]
    Interrupted(String),

    #[error("transfer failed (exit code {code}): {detail}")]
    Failed { code: i32, detail: String },
}

impl TransferError {
    /// Whether a retry can plausibly succeed.
    ///
    /// Network-shaped failures (host unreachable, timeout, interrupted
    /// stream) are retried; a missing source file or missing tool cannot be
    /// fixed by trying again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unreachable(_) | Self::Timeout(_) | Self::Interrupted(_)
        )
    }
}

// ── Host errors ───────────────────────────────────────────────────────────────

/// Errors related to build host identifiers.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid build host name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors related to the host settings registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed settings for host '{host}': {detail}")]
    Malformed { host: String, detail: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
