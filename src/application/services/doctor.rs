//! Application service — environment diagnosis use-case.

use anyhow::Result;

use crate::application::ports::{DoctorProbe, ProgressReporter};
use crate::domain::doctor::{DoctorChecks, collect_issues};

/// Aggregated diagnosis: raw checks plus the actionable issues derived
/// from them.
#[derive(Debug)]
pub struct Diagnosis {
    /// Raw probe results.
    pub checks: DoctorChecks,
    /// Human-readable issues; empty means healthy.
    pub issues: Vec<String>,
}

impl Diagnosis {
    /// Whether the environment is ready for collections.
    #[must_use]
    pub fn healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run all environment probes and derive actionable issues.
///
/// # Errors
///
/// Returns an error if probing itself fails (not when checks merely fail).
pub async fn diagnose(
    probe: &impl DoctorProbe,
    reporter: &impl ProgressReporter,
) -> Result<Diagnosis> {
    reporter.step("checking transfer tools and directories...");
    let checks = probe.probe_all().await?;
    let issues = collect_issues(&checks);
    Ok(Diagnosis { checks, issues })
}
