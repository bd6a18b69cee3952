//! Infrastructure implementation of the `DoctorProbe` port.
//!
//! Probes the controller environment: transfer tools on PATH, store and
//! cache directories, and the configured ssh identity.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{CommandRunner, DoctorProbe};
use crate::domain::config::HaulConfig;
use crate::domain::doctor::{DoctorChecks, SshChecks, StoreChecks, ToolChecks};
use crate::infra::config::ResolvedPaths;

/// Production environment probe over a `CommandRunner` and `std::fs`.
pub struct EnvProbe<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a HaulConfig,
    paths: &'a ResolvedPaths,
}

impl<'a, R: CommandRunner> EnvProbe<'a, R> {
    #[must_use]
    pub fn new(runner: &'a R, config: &'a HaulConfig, paths: &'a ResolvedPaths) -> Self {
        Self {
            runner,
            config,
            paths,
        }
    }

    async fn probe_tools(&self) -> ToolChecks {
        let rsync_version = match self.runner.run("rsync", &["--version"]).await {
            Ok(output) if output.status.success() => {
                parse_rsync_version(&String::from_utf8_lossy(&output.stdout))
            }
            _ => None,
        };
        // ssh prints its version to stderr and exits 0 with -V.
        let ssh_found = matches!(
            self.runner.run("ssh", &["-V"]).await,
            Ok(output) if output.status.success()
        );
        ToolChecks {
            rsync_found: rsync_version.is_some(),
            rsync_version,
            ssh_found,
        }
    }

    fn probe_store(&self) -> StoreChecks {
        StoreChecks {
            store_exists: self.paths.store_root.is_dir(),
            store_writable: dir_writable(&self.paths.store_root),
            cache_exists: self.paths.cache_root.is_dir(),
            registry_exists: self.paths.registry_root.is_dir(),
        }
    }

    fn probe_ssh(&self) -> SshChecks {
        let identity = self.config.ssh.identity_file.as_deref();
        let identity_exists = identity.is_some_and(Path::is_file);
        SshChecks {
            identity_configured: identity.is_some(),
            identity_exists,
            identity_permissions_ok: !identity_exists
                || identity.is_some_and(identity_permissions_ok),
            strict_host_key_checking: self.config.ssh.strict_host_key_checking,
        }
    }
}

impl<R: CommandRunner> DoctorProbe for EnvProbe<'_, R> {
    async fn probe_all(&self) -> Result<DoctorChecks> {
        Ok(DoctorChecks {
            tools: self.probe_tools().await,
            store: self.probe_store(),
            ssh: self.probe_ssh(),
        })
    }
}

/// Extract the version token from `rsync --version` output
/// (`"rsync  version 3.2.7  protocol version 31"`).
fn parse_rsync_version(stdout: &str) -> Option<String> {
    let first = stdout.lines().next()?;
    let mut words = first.split_whitespace();
    while let Some(word) = words.next() {
        if word == "version" {
            return words.next().map(str::to_string);
        }
    }
    None
}

/// Whether a probe file can be created in the directory.
fn dir_writable(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    let probe = dir.join(".haul-doctor-probe");
    let ok = std::fs::write(&probe, b"").is_ok();
    let _ = std::fs::remove_file(&probe);
    ok
}

/// 0600 or stricter — no group/other bits set. Always `true` off Unix.
#[cfg(unix)]
fn identity_permissions_ok(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o077 == 0)
}

#[cfg(not(unix))]
fn identity_permissions_ok(_path: &Path) -> bool {
    true
}
