//! Unit tests for the doctor use-case with a canned probe.

#![allow(clippy::expect_used)]

use anyhow::Result;

use haul_cli::application::ports::DoctorProbe;
use haul_cli::application::services::doctor::diagnose;
use haul_cli::domain::doctor::{DoctorChecks, SshChecks, StoreChecks, ToolChecks};

use crate::helpers::RecordingReporter;

struct CannedProbe(fn() -> DoctorChecks);

impl DoctorProbe for CannedProbe {
    async fn probe_all(&self) -> Result<DoctorChecks> {
        Ok((self.0)())
    }
}

fn healthy() -> DoctorChecks {
    DoctorChecks {
        tools: ToolChecks {
            rsync_found: true,
            rsync_version: Some("3.2.7".into()),
            ssh_found: true,
        },
        store: StoreChecks {
            store_exists: true,
            store_writable: true,
            cache_exists: true,
            registry_exists: true,
        },
        ssh: SshChecks {
            identity_configured: false,
            identity_exists: false,
            identity_permissions_ok: true,
            strict_host_key_checking: true,
        },
    }
}

fn missing_rsync() -> DoctorChecks {
    let mut checks = healthy();
    checks.tools.rsync_found = false;
    checks.tools.rsync_version = None;
    checks
}

#[tokio::test]
async fn test_diagnose_healthy_environment() {
    let reporter = RecordingReporter::default();
    let diagnosis = diagnose(&CannedProbe(healthy), &reporter)
        .await
        .expect("diagnose");

    assert!(diagnosis.healthy());
    assert!(diagnosis.issues.is_empty());
}

#[tokio::test]
async fn test_diagnose_missing_rsync_is_unhealthy() {
    let reporter = RecordingReporter::default();
    let diagnosis = diagnose(&CannedProbe(missing_rsync), &reporter)
        .await
        .expect("diagnose");

    assert!(!diagnosis.healthy());
    assert_eq!(diagnosis.issues.len(), 1);
    assert!(diagnosis.issues[0].contains("rsync"));
}

#[tokio::test]
async fn test_diagnose_emits_step_line() {
    let reporter = RecordingReporter::default();
    diagnose(&CannedProbe(healthy), &reporter)
        .await
        .expect("diagnose");

    let lines = reporter.lines();
    assert!(lines[0].starts_with("step:"), "got: {lines:?}");
}
