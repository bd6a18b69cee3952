//! Domain types and validators for Haul configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "store.root",
    "ssh.user",
    "ssh.identity_file",
    "ssh.strict_host_key_checking",
    "transfer.timeout_secs",
    "transfer.attempts",
    "transfer.retry_delay_secs",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.haul/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HaulConfig {
    /// Image store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Staged cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Host settings registry location.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// SSH settings for remote pulls.
    #[serde(default)]
    pub ssh: SshConfig,
    /// Transfer timeout and retry policy.
    #[serde(default)]
    pub transfer: TransferConfig,
}

/// Image store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Destination directory for collected images.
    /// `None` resolves to `~/.haul/images` at load time.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Staged cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    /// Root of the staged cache. Artifacts pushed by a host live under
    /// `<root>/hosts/<host>/files/`. `None` resolves to `~/.haul/cache`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Host settings registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    /// Directory holding one `<host>.yaml` settings file per build host.
    /// `None` resolves to `~/.haul/hosts`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// SSH configuration for rsync pulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    /// Remote user on build hosts.
    #[serde(default = "default_ssh_user")]
    pub user: String,
    /// Private key presented to build hosts. `None` lets ssh pick its
    /// default identity.
    #[serde(default)]
    pub identity_file: Option<PathBuf>,
    /// When `false`, host keys are not verified and the known-hosts file is
    /// discarded. Defaults to `true`.
    #[serde(default = "default_true")]
    pub strict_host_key_checking: bool,
    /// Explicit known-hosts file. `None` lets ssh use its default.
    /// Ignored when `strict_host_key_checking` is `false`.
    #[serde(default)]
    pub known_hosts_file: Option<PathBuf>,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            user: default_ssh_user(),
            identity_file: None,
            strict_host_key_checking: true,
            known_hosts_file: None,
        }
    }
}

/// Transfer timeout and retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Per-attempt timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum attempts for retryable failures (minimum 1).
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Base retry delay in seconds; doubles after each failed attempt.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            attempts: default_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl TransferConfig {
    /// Per-attempt timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Backoff delay after the given 1-based failed attempt.
    ///
    /// Exponential: `retry_delay_secs * 2^(attempt-1)`, saturating.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_secs(self.retry_delay_secs.saturating_mul(factor))
    }
}

fn default_ssh_user() -> String {
    "root".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |valid: &str| {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: valid.to_string(),
        }
        .into())
    };

    match key {
        "ssh.strict_host_key_checking" => {
            if value != "true" && value != "false" {
                return invalid("true, false");
            }
        }
        "transfer.timeout_secs" | "transfer.retry_delay_secs" => {
            if value.parse::<u64>().is_err() {
                return invalid("a non-negative integer number of seconds");
            }
        }
        "transfer.attempts" => {
            if !value.parse::<u32>().is_ok_and(|n| n >= 1) {
                return invalid("an integer >= 1");
            }
        }
        "ssh.user" => {
            if value.is_empty() || value.contains(['@', ':']) || value.contains(char::is_whitespace)
            {
                return invalid("a non-empty user name without '@', ':' or whitespace");
            }
        }
        _ => {}
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
