//! Infrastructure implementation of the `Transport` port for rsync pulls.
//!
//! Delegates to the system `rsync` binary over ssh rather than speaking the
//! rsync protocol natively. All ssh options are built from [`SshConfig`] —
//! nothing security-relevant is hardcoded.

use std::path::PathBuf;
use std::time::Duration;

use crate::application::ports::{CommandRunner, FetchSpec, Transport};
use crate::domain::config::SshConfig;
use crate::domain::error::TransferError;
use crate::domain::host::remote_source;
use crate::domain::settings::TransportKind;

/// Pulls images from build hosts with `rsync -a --partial -e ssh`.
pub struct RsyncTransport<'a, R: CommandRunner> {
    runner: &'a R,
    ssh: &'a SshConfig,
    timeout: Duration,
}

impl<'a, R: CommandRunner> RsyncTransport<'a, R> {
    #[must_use]
    pub fn new(runner: &'a R, ssh: &'a SshConfig, timeout: Duration) -> Self {
        Self {
            runner,
            ssh,
            timeout,
        }
    }

    /// The `-e` remote shell command rsync will use.
    ///
    /// `BatchMode=yes` keeps a misconfigured host from hanging the transfer
    /// on an interactive password prompt.
    #[must_use]
    pub fn ssh_command(&self) -> String {
        let mut cmd = String::from("ssh -o BatchMode=yes");
        if let Some(identity) = &self.ssh.identity_file {
            cmd.push_str(&format!(" -i {}", identity.display()));
        }
        if self.ssh.strict_host_key_checking {
            cmd.push_str(" -o StrictHostKeyChecking=yes");
            if let Some(known_hosts) = &self.ssh.known_hosts_file {
                cmd.push_str(&format!(" -o UserKnownHostsFile={}", known_hosts.display()));
            }
        } else {
            cmd.push_str(" -o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null");
        }
        cmd
    }

    /// Full rsync argv (without the program name) for the given fetch.
    #[must_use]
    pub fn build_args(&self, spec: &FetchSpec<'_>) -> Vec<String> {
        vec![
            "-a".to_string(),
            "--partial".to_string(),
            "-e".to_string(),
            self.ssh_command(),
            remote_source(spec.user, spec.host, spec.path),
            spec.dest_dir.display().to_string(),
        ]
    }
}

impl<R: CommandRunner> Transport for RsyncTransport<'_, R> {
    fn kind(&self) -> TransportKind {
        TransportKind::Rsync
    }

    fn describe(&self, spec: &FetchSpec<'_>) -> String {
        remote_source(spec.user, spec.host, spec.path)
    }

    async fn fetch(&self, spec: &FetchSpec<'_>) -> Result<PathBuf, TransferError> {
        let file_name = std::path::Path::new(spec.path)
            .file_name()
            .ok_or_else(|| TransferError::SourceMissing(spec.path.to_string()))?
            .to_owned();

        let args = self.build_args(spec);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self
            .runner
            .run_with_timeout("rsync", &arg_refs, self.timeout)
            .await
            .map_err(|e| {
                // The runner fails for exactly two reasons: the binary could
                // not be spawned, or the timeout fired and the child was
                // killed.
                let msg = format!("{e:#}");
                if msg.contains("timed out") {
                    TransferError::Timeout(msg)
                } else {
                    TransferError::ToolMissing(msg)
                }
            })?;

        if output.status.success() {
            return Ok(spec.dest_dir.join(file_name));
        }

        let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(map_exit_code(output.status.code(), detail))
    }
}

/// Map an rsync exit code onto the transfer error taxonomy.
///
/// See rsync(1) EXIT VALUES. Network-shaped codes become retryable
/// variants; data errors fail fast.
fn map_exit_code(code: Option<i32>, detail: String) -> TransferError {
    match code {
        Some(23 | 24) => TransferError::SourceMissing(detail),
        Some(10 | 255) => TransferError::Unreachable(detail),
        Some(30 | 35) => TransferError::Timeout(detail),
        Some(12 | 20) => TransferError::Interrupted(detail),
        Some(127) => TransferError::ToolMissing(detail),
        Some(code) => TransferError::Failed { code, detail },
        // Killed by signal — treat like an interrupted stream.
        None => TransferError::Interrupted(detail),
    }
}
