//! Console summary printer.

use crate::harness::RunSummary;
use colored::*;

/// Prints a run summary to stdout.
pub struct ConsolePrinter {
    no_color: bool,
}

impl Default for ConsolePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsolePrinter {
    pub fn new() -> Self {
        Self { no_color: false }
    }

    /// Disable colored output
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Print the closing summary line
    pub fn print_summary(&self, summary: &RunSummary) {
        if self.no_color {
            colored::control::set_override(false);
        }

        println!("{}", "─".repeat(50));

        let status = if summary.all_passed() {
            "PASSED".green().bold()
        } else {
            "FAILED".red().bold()
        };

        println!(
            "Run result: {} | {} total, {} passed, {} failed",
            status,
            summary.total().to_string().bold(),
            summary.passed().to_string().green().bold(),
            if summary.failed() > 0 {
                summary.failed().to_string().red().bold()
            } else {
                summary.failed().to_string().normal()
            }
        );

        if self.no_color {
            colored::control::unset_override();
        }
    }
}
