//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::HaulConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<HaulConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &HaulConfig) -> Result<()> {
    store.save(config)
}

/// Apply one validated `key = value` assignment to the configuration.
///
/// Callers must have run `validate_config_key` / `validate_config_value`
/// first; this function only routes the value to the right field.
///
/// # Errors
///
/// Returns an error for keys outside the settable whitelist.
pub fn apply_setting(config: &mut HaulConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "store.root" => config.store.root = Some(value.into()),
        "ssh.user" => config.ssh.user = value.to_string(),
        "ssh.identity_file" => config.ssh.identity_file = Some(value.into()),
        "ssh.strict_host_key_checking" => {
            config.ssh.strict_host_key_checking = value == "true";
        }
        "transfer.timeout_secs" => {
            config.transfer.timeout_secs = value.parse().unwrap_or(config.transfer.timeout_secs);
        }
        "transfer.attempts" => {
            config.transfer.attempts = value.parse().unwrap_or(config.transfer.attempts);
        }
        "transfer.retry_delay_secs" => {
            config.transfer.retry_delay_secs =
                value.parse().unwrap_or(config.transfer.retry_delay_secs);
        }
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}
