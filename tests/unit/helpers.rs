//! Shared test helpers: mock port implementations and output constructors.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

use anyhow::Result;

use haul_cli::application::ports::{
    CommandRunner, FetchSpec, FileHasher, HistoryStore, HostRegistry, LocalFs, ProgressReporter,
    Transport,
};
use haul_cli::domain::error::TransferError;
use haul_cli::domain::history::CollectionRecord;
use haul_cli::domain::settings::{HostSettings, TransportKind};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Recording command runner ─────────────────────────────────────────────────

/// Records every invocation and replays canned outputs in order; the last
/// output repeats once the list is exhausted.
pub struct RecordingRunner {
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
    outputs: Mutex<Vec<Output>>,
}

impl RecordingRunner {
    pub fn new(outputs: Vec<Output>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outputs: Mutex::new(outputs),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn next_output(&self) -> Output {
        let mut outputs = self.outputs.lock().expect("outputs lock");
        if outputs.len() > 1 {
            outputs.remove(0)
        } else {
            outputs
                .first()
                .map_or_else(|| ok_output(b""), |o| Output {
                    status: o.status,
                    stdout: o.stdout.clone(),
                    stderr: o.stderr.clone(),
                })
        }
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, std::time::Duration::from_secs(1))
            .await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: std::time::Duration,
    ) -> Result<Output> {
        self.calls.lock().expect("calls lock").push((
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
        ));
        Ok(self.next_output())
    }
}

// ── Canned host registry ─────────────────────────────────────────────────────

/// Returns fixed settings for every host and records lookups in the shared
/// event log.
pub struct CannedRegistry {
    pub settings: HostSettings,
    pub events: EventLog,
}

impl HostRegistry for CannedRegistry {
    async fn settings(&self, host: &str) -> Result<HostSettings> {
        self.events.push(&format!("registry:{host}"));
        Ok(self.settings.clone())
    }

    async fn hosts(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

// ── Scripted transport ───────────────────────────────────────────────────────

/// A transport returning scripted results per fetch attempt; records every
/// spec it is asked to fetch.
pub struct ScriptedTransport {
    kind: TransportKind,
    pub fetches: Mutex<Vec<(String, String, PathBuf)>>,
    results: Mutex<Vec<Result<PathBuf, TransferError>>>,
}

impl ScriptedTransport {
    pub fn new(kind: TransportKind, results: Vec<Result<PathBuf, TransferError>>) -> Self {
        Self {
            kind,
            fetches: Mutex::new(Vec::new()),
            results: Mutex::new(results),
        }
    }

    pub fn succeeding(kind: TransportKind, dest: PathBuf) -> Self {
        Self::new(kind, vec![Ok(dest)])
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().expect("fetches lock").len()
    }
}

impl Transport for ScriptedTransport {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn describe(&self, spec: &FetchSpec<'_>) -> String {
        match self.kind {
            TransportKind::Rsync => format!("{}@{}:{}", spec.user, spec.host, spec.path),
            TransportKind::Staged => format!("cache:{}:{}", spec.host, spec.path),
        }
    }

    async fn fetch(&self, spec: &FetchSpec<'_>) -> Result<PathBuf, TransferError> {
        self.fetches.lock().expect("fetches lock").push((
            spec.host.to_string(),
            spec.user.to_string(),
            spec.dest_dir.to_path_buf(),
        ));
        let mut results = self.results.lock().expect("results lock");
        if results.is_empty() {
            return Err(TransferError::Failed {
                code: 98,
                detail: "scripted transport exhausted".into(),
            });
        }
        results.remove(0)
    }
}

// ── Event log for ordering assertions ────────────────────────────────────────

/// Shared append-only event log, cloneable across mocks.
#[derive(Clone, Default)]
pub struct EventLog(std::sync::Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: &str) {
        self.0.lock().expect("events lock").push(event.to_string());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().expect("events lock").clone()
    }
}

// ── Filesystem / hashing mocks ───────────────────────────────────────────────

/// Records directory creation in the shared event log; never touches disk.
pub struct FakeFs {
    pub events: EventLog,
}

impl LocalFs for FakeFs {
    fn exists(&self, _path: &std::path::Path) -> bool {
        false
    }

    fn create_dir_all(&self, path: &std::path::Path) -> Result<()> {
        self.events.push(&format!("mkdir:{}", path.display()));
        Ok(())
    }
}

/// Returns a fixed digest for any path.
pub struct FixedHasher(pub &'static str);

impl FileHasher for FixedHasher {
    fn sha256_file(&self, _path: &std::path::Path) -> Result<String> {
        Ok(self.0.to_string())
    }
}

// ── History / reporter mocks ─────────────────────────────────────────────────

/// In-memory ledger.
#[derive(Default)]
pub struct MemoryHistory {
    pub records: Mutex<Vec<CollectionRecord>>,
}

impl HistoryStore for MemoryHistory {
    async fn append(&self, record: CollectionRecord) -> Result<()> {
        self.records.lock().expect("records lock").push(record);
        Ok(())
    }

    async fn load(&self) -> Result<Vec<CollectionRecord>> {
        Ok(self.records.lock().expect("records lock").clone())
    }
}

/// Captures reporter lines for assertions.
#[derive(Default)]
pub struct RecordingReporter {
    pub lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lines lock").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.lines
            .lock()
            .expect("lines lock")
            .push(format!("step:{message}"));
    }

    fn success(&self, message: &str) {
        self.lines
            .lock()
            .expect("lines lock")
            .push(format!("success:{message}"));
    }

    fn warn(&self, message: &str) {
        self.lines
            .lock()
            .expect("lines lock")
            .push(format!("warn:{message}"));
    }
}
