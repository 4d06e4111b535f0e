//! Styled terminal output.
//!
//! Data goes to stdout, status lines go to stderr so `camps list ... > rows`
//! captures only the table.

use std::fmt::Display;

use console::{Term, style};

pub struct Output {
    out: Term,
    err: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    /// Green checkmark line.
    pub fn success(&self, message: impl Display) {
        drop(
            self.err
                .write_line(&format!("{} {}", style("✓").green().bold(), message)),
        );
    }

    /// Yellow warning line.
    pub fn warning(&self, message: impl Display) {
        drop(
            self.err
                .write_line(&format!("{} {}", style("⚠").yellow().bold(), message)),
        );
    }

    /// Blue info line.
    pub fn info(&self, message: impl Display) {
        drop(
            self.err
                .write_line(&format!("{} {}", style("ℹ").blue().bold(), message)),
        );
    }

    /// Plain data line on stdout.
    pub fn print(&self, message: impl Display) {
        drop(self.out.write_line(&message.to_string()));
    }

    pub fn header(&self, message: impl Display) {
        drop(self.out.write_line(&style(message).bold().cyan().to_string()));
    }

    pub fn dim(&self, message: impl Display) {
        drop(self.out.write_line(&style(message).dim().to_string()));
    }
}
