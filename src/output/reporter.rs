//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".cyan());
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".green());
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".yellow());
        }
    }
}

/// Spinner-backed progress reporter for interactive terminals.
///
/// `step()` updates the spinner message in place; `warn()` prints above the
/// spinner; `success()` freezes the spinner with a checkmark.
pub struct SpinnerReporter {
    pb: indicatif::ProgressBar,
}

impl SpinnerReporter {
    /// Create a spinner reporter with an initial message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            pb: crate::output::progress::spinner(message),
        }
    }

    /// Clear the spinner without a final message (error path).
    pub fn clear(&self) {
        crate::output::progress::finish_clear(&self.pb);
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn success(&self, message: &str) {
        crate::output::progress::finish_ok(&self.pb, message);
    }

    fn warn(&self, message: &str) {
        self.pb.println(format!("  ! {message}"));
    }
}

/// Either reporter, selected per invocation (TTY vs quiet/JSON).
pub enum Reporter<'a> {
    /// Plain line-oriented output.
    Terminal(TerminalReporter<'a>),
    /// Animated spinner output.
    Spinner(SpinnerReporter),
}

impl Reporter<'_> {
    /// Clear any in-flight spinner so a following error line starts clean.
    pub fn clear(&self) {
        if let Self::Spinner(spinner) = self {
            spinner.clear();
        }
    }
}

impl ProgressReporter for Reporter<'_> {
    fn step(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.step(message),
            Self::Spinner(r) => r.step(message),
        }
    }

    fn success(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.success(message),
            Self::Spinner(r) => r.success(message),
        }
    }

    fn warn(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.warn(message),
            Self::Spinner(r) => r.warn(message),
        }
    }
}
