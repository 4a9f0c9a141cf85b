//! Progress of a running push, on the terminal.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

const SPINNER_TEMPLATE: &str = "  {spinner:.cyan} {msg} {elapsed:.dim}";

/// Spinner whose message is the step currently running.
fn phase_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// On a TTY each `step()` becomes the message of a single spinner; elsewhere
/// it prints `"  → {message}"`. Everything is suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        let spinner = ctx.show_progress().then(phase_spinner);
        Self { ctx, spinner }
    }

    /// Print a block of text above the spinner, or plainly without one.
    pub fn print(&self, text: &str) {
        match &self.spinner {
            Some(pb) => pb.suspend(|| println!("{text}")),
            None => println!("{text}"),
        }
    }

    /// Stop and remove the spinner.
    pub fn clear(&self) {
        if let Some(pb) = &self.spinner {
            pb.set_message("");
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        match &self.spinner {
            Some(pb) => {
                pb.reset_elapsed();
                pb.set_message(message.to_string());
            }
            None => println!("  {} {message}", "→".style(self.ctx.styles.info)),
        }
    }

    fn success(&self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.println(format!("  {} {message}", "✓".style(self.ctx.styles.success))),
            None => self.ctx.success(message),
        }
    }

    fn warn(&self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.println(format!("  {} {message}", "⚠".style(self.ctx.styles.warning))),
            None => self.ctx.warn(message),
        }
    }
}
