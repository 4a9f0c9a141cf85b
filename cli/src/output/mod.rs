//! Terminal output: styling, progress and rendering of push results.

pub mod json;
pub mod presenter;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use presenter::render;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Suppresses progress and informational lines. Rendered summaries and
    /// errors are printed regardless.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a TTY, and never with `no_color` or a non-empty
    /// `NO_COLOR`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let use_colors = !no_color && is_tty && !no_color_env;

        Self {
            styles: if use_colors {
                Styles::colored()
            } else {
                Styles::default()
            },
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        self.line("✓", self.styles.success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.line("⚠", self.styles.warning, msg);
    }

    pub fn info(&self, msg: &str) {
        self.line("ℹ", self.styles.info, msg);
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    fn line(&self, marker: &str, style: owo_colors::Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", marker.style(style));
        }
    }
}
