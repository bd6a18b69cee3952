//! `haul doctor` — diagnose the controller environment.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::doctor::diagnose;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::probes::EnvProbe;
use crate::output::TerminalReporter;

/// Run the doctor command. Exits non-zero when issues are found.
///
/// # Errors
///
/// Returns an error if probing itself fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let runner = TokioCommandRunner::default();
    let probe = EnvProbe::new(&runner, &app.config, &app.paths);

    // In JSON mode stdout must stay machine-readable.
    let silent = crate::output::OutputContext::new(true, true);
    let reporter = if app.is_json() {
        TerminalReporter::new(&silent)
    } else {
        TerminalReporter::new(&app.output)
    };

    let diagnosis = diagnose(&probe, &reporter).await?;

    if app.is_json() {
        let obj = serde_json::json!({
            "checks": diagnosis.checks,
            "issues": diagnosis.issues,
            "healthy": diagnosis.healthy(),
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        render_human(app, &diagnosis);
    }

    if diagnosis.healthy() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn render_human(app: &AppContext, diagnosis: &crate::application::services::doctor::Diagnosis) {
    let checks = &diagnosis.checks;
    let out = &app.output;

    println!();
    out.header("Tools:");
    if checks.tools.rsync_found {
        out.success(&format!(
            "rsync {}",
            checks.tools.rsync_version.as_deref().unwrap_or("found")
        ));
    } else {
        out.error("rsync not found");
    }
    if checks.tools.ssh_found {
        out.success("ssh found");
    } else {
        out.error("ssh not found");
    }

    println!();
    out.header("Directories:");
    render_flag(app, checks.store.store_exists, "image store exists");
    render_flag(app, checks.store.store_writable, "image store writable");
    render_flag(app, checks.store.cache_exists, "staged cache exists");
    render_flag(app, checks.store.registry_exists, "host registry exists");

    println!();
    out.header("SSH:");
    if checks.ssh.identity_configured {
        render_flag(app, checks.ssh.identity_exists, "identity file exists");
        render_flag(
            app,
            checks.ssh.identity_permissions_ok,
            "identity permissions 0600",
        );
    } else {
        out.info("no identity file configured (ssh defaults apply)");
    }
    if checks.ssh.strict_host_key_checking {
        out.success("host key checking enabled");
    } else {
        out.warn("host key checking DISABLED");
    }

    println!();
    if diagnosis.healthy() {
        out.success("environment ready");
    } else {
        for issue in &diagnosis.issues {
            out.error(issue);
        }
    }
}

fn render_flag(app: &AppContext, ok: bool, label: &str) {
    if ok {
        app.output.success(label);
    } else {
        app.output.warn(&format!("{label}: no"));
    }
}
