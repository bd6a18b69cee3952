//! Application context — unified state passed to every command handler.
//!
//! `AppContext` replaces the per-command pattern of constructing loose
//! `OutputContext`, config store, and path instances. Adding a new
//! cross-cutting concern (e.g. `--verbose`, telemetry) requires only one
//! field change here — zero command signatures change.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::HaulConfig;
use crate::infra::config::{ResolvedPaths, YamlConfigStore, resolve_paths};
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Skip interactive prompts (also set by `CI` / `HAUL_YES` env vars).
    pub yes: bool,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration store backing `config`.
    pub config_store: YamlConfigStore,
    /// Loaded configuration.
    pub config: HaulConfig,
    /// Store/cache/registry directories with defaults applied.
    pub paths: ResolvedPaths,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `HAUL_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the home
    /// directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("HAUL_YES").is_ok();
        let non_interactive = flags.yes || ci_env;

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_store.load().context("loading configuration")?;
        let paths = resolve_paths(&config)?;

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config_store,
            config,
            paths,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `HAUL_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
