//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::HaulConfig;

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<HaulConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(HaulConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &HaulConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("HAUL_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".haul").join("config.yaml"))
    }
}

/// Directory defaults derived from the config, resolved against `~/.haul`.
pub struct ResolvedPaths {
    /// Destination directory for collected images.
    pub store_root: PathBuf,
    /// Root of the staged cache.
    pub cache_root: PathBuf,
    /// Host settings registry directory.
    pub registry_root: PathBuf,
}

/// Resolve the configured directories, filling unset entries with the
/// `~/.haul` defaults.
///
/// # Errors
///
/// Returns an error if a default is needed and the home directory cannot
/// be determined.
pub fn resolve_paths(config: &HaulConfig) -> Result<ResolvedPaths> {
    let haul_dir = || -> Result<PathBuf> {
        dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
            .map(|h| h.join(".haul"))
    };

    let store_root = match &config.store.root {
        Some(root) => root.clone(),
        None => haul_dir()?.join("images"),
    };
    let cache_root = match &config.cache.root {
        Some(root) => root.clone(),
        None => haul_dir()?.join("cache"),
    };
    let registry_root = match &config.registry.root {
        Some(root) => root.clone(),
        None => haul_dir()?.join("hosts"),
    };

    Ok(ResolvedPaths {
        store_root,
        cache_root,
        registry_root,
    })
}
