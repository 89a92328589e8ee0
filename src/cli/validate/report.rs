//! Validation tally and final summary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use owo_colors::{OwoColorize, Stream::Stdout};

use crate::utils::plural::plural_count;

/// Files checked and files with at least one failed check.
#[derive(Debug, Default)]
pub struct ValidationReport {
    checked: usize,
    failed: Vec<PathBuf>,
}

impl ValidationReport {
    pub fn record(&mut self, file: &Path, passed: bool) {
        self.checked += 1;
        if !passed {
            self.failed.push(file.to_path_buf());
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed(&self) -> &[PathBuf] {
        &self.failed
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// Final line, plus the failing files.
    pub fn print(&self) {
        if self.all_passed() {
            let line = "All SVGs passed validation!";
            println!("{}", line.if_supports_color(Stdout, |l| l.green()));
            return;
        }
        let line = "Some SVGs failed - check above for details.";
        println!("{}", line.if_supports_color(Stdout, |l| l.red()));
        for path in self.failed() {
            println!("  {} {}", "→".if_supports_color(Stdout, |a| a.red()), path.display());
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "checked {}, {} failed",
            plural_count(self.checked, "file"),
            self.failed.len()
        )
    }
}
