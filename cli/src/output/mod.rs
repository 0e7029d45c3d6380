//! Terminal output for the generator.

pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Styling and verbosity shared by everything that prints to stdout.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

/// Colors only when stdout is a terminal and the user has not opted out.
#[must_use]
pub fn colors_enabled(no_color: bool, stdout_is_tty: bool) -> bool {
    stdout_is_tty && !no_color
}

impl OutputContext {
    /// Build the context from `--no-color` (or `NO_COLOR`) and `--quiet`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let mut styles = Styles::default();
        if colors_enabled(no_color, Term::stdout().is_term()) {
            styles.colorize();
        }
        Self { styles, quiet }
    }

    fn marked(&self, marker: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", marker.style(style));
        }
    }

    /// `→ msg`, a pipeline stage starting.
    pub fn step(&self, msg: &str) {
        self.marked("→", self.styles.step, msg);
    }

    /// `✓ msg`, a manifest written.
    pub fn success(&self, msg: &str) {
        self.marked("✓", self.styles.success, msg);
    }

    /// `⚠ msg`, a non-fatal oddity such as an empty module tree.
    pub fn warn(&self, msg: &str) {
        self.marked("⚠", self.styles.warning, msg);
    }

    /// Section title of the run summary.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// One dimmed-key line of the run summary.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}
