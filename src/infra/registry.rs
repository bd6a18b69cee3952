//! Infrastructure implementation of the `HostRegistry` port.
//!
//! One YAML file per build host under the registry directory:
//! `<registry.root>/<host>.yaml`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::HostRegistry;
use crate::domain::error::RegistryError;
use crate::domain::settings::HostSettings;

/// Production `HostRegistry` reading per-host YAML settings files.
pub struct YamlHostRegistry {
    root: PathBuf,
}

impl YamlHostRegistry {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn entry_path(&self, host: &str) -> PathBuf {
        self.root.join(format!("{host}.yaml"))
    }
}

impl HostRegistry for YamlHostRegistry {
    async fn settings(&self, host: &str) -> Result<HostSettings> {
        let path = self.entry_path(host);
        if !path.exists() {
            // An unregistered host simply gets the defaults (rsync pull).
            return Ok(HostSettings::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&content).map_err(|e| {
            RegistryError::Malformed {
                host: host.to_string(),
                detail: e.to_string(),
            }
            .into()
        })
    }

    async fn hosts(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut hosts = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("reading {}", self.root.display()))?
        {
            let path = entry.context("reading registry entry")?.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                if let Some(stem) = path.file_stem() {
                    hosts.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        hosts.sort();
        Ok(hosts)
    }
}
