//! Argv-level tests: the exact rsync invocation produced for a pull.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use haul_cli::application::ports::{FetchSpec, Transport};
use haul_cli::domain::config::SshConfig;
use haul_cli::domain::error::TransferError;
use haul_cli::infra::rsync::RsyncTransport;

use crate::helpers::{RecordingRunner, err_output, ok_output};

fn ssh_insecure() -> SshConfig {
    SshConfig {
        user: "root".into(),
        identity_file: Some(PathBuf::from("/etc/haul/id_ed25519")),
        strict_host_key_checking: false,
        known_hosts_file: None,
    }
}

fn spec<'a>(dest: &'a Path) -> FetchSpec<'a> {
    FetchSpec {
        host: "build-01",
        path: "/srv/images/leap.raw",
        dest_dir: dest,
        user: "root",
    }
}

#[tokio::test]
async fn test_fetch_invokes_rsync_with_full_argv() {
    let runner = RecordingRunner::new(vec![ok_output(b"")]);
    let ssh = ssh_insecure();
    let transport = RsyncTransport::new(&runner, &ssh, Duration::from_secs(5));
    let dest = PathBuf::from("/srv/store");

    let collected = transport.fetch(&spec(&dest)).await.expect("fetch");
    assert_eq!(collected, PathBuf::from("/srv/store/leap.raw"));

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let (program, args) = &calls[0];
    assert_eq!(program, "rsync");
    let expected_ssh = "ssh -o BatchMode=yes -i /etc/haul/id_ed25519 \
                        -o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null";
    assert_eq!(
        args,
        &vec![
            "-a".to_string(),
            "--partial".to_string(),
            "-e".to_string(),
            expected_ssh.to_string(),
            "root@build-01:/srv/images/leap.raw".to_string(),
            "/srv/store".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fetch_strict_checking_keeps_known_hosts() {
    let runner = RecordingRunner::new(vec![ok_output(b"")]);
    let ssh = SshConfig {
        user: "root".into(),
        identity_file: None,
        strict_host_key_checking: true,
        known_hosts_file: Some(PathBuf::from("/etc/haul/known_hosts")),
    };
    let transport = RsyncTransport::new(&runner, &ssh, Duration::from_secs(5));
    let dest = PathBuf::from("/srv/store");

    transport.fetch(&spec(&dest)).await.expect("fetch");

    let calls = runner.calls();
    let ssh_cmd = &calls[0].1[3];
    assert!(ssh_cmd.contains("-o StrictHostKeyChecking=yes"));
    assert!(ssh_cmd.contains("-o UserKnownHostsFile=/etc/haul/known_hosts"));
    assert!(!ssh_cmd.contains("/dev/null"));
}

#[tokio::test]
async fn test_fetch_nonzero_exit_maps_to_transfer_error() {
    let runner = RecordingRunner::new(vec![err_output(255, b"ssh: connect refused")]);
    let ssh = ssh_insecure();
    let transport = RsyncTransport::new(&runner, &ssh, Duration::from_secs(5));
    let dest = PathBuf::from("/srv/store");

    let err = transport.fetch(&spec(&dest)).await.expect_err("must fail");
    assert!(matches!(err, TransferError::Unreachable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_fetch_partial_transfer_exit_is_source_missing() {
    let runner = RecordingRunner::new(vec![err_output(23, b"link_stat failed")]);
    let ssh = ssh_insecure();
    let transport = RsyncTransport::new(&runner, &ssh, Duration::from_secs(5));
    let dest = PathBuf::from("/srv/store");

    let err = transport.fetch(&spec(&dest)).await.expect_err("must fail");
    assert!(matches!(err, TransferError::SourceMissing(_)));
    assert!(!err.is_retryable());
}
