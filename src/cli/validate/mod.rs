//! `validate`: check every SVG under a directory.
//!
//! Each file gets a well-formedness check (`xmllint` or the builtin parser),
//! then optionally `svgcheck` and a `usvg` render. Any failure makes the
//! command exit with status 1.

mod check;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use jwalk::WalkDir;
use owo_colors::{OwoColorize, Stream::Stdout};

use crate::cli::ValidateArgs;
use crate::config::CardforgeConfig;
use crate::log;
use crate::logger::{check_line, status_warning};

use check::{Verdict, XmlCheck};
use report::ValidationReport;

/// Checks enabled for this run.
struct Checks {
    xml: XmlCheck,
    svgcheck: bool,
    render: bool,
    verbose: bool,
    timeout: Duration,
}

impl Checks {
    /// Run every enabled check on `file`, printing one line per check.
    fn run(&self, file: &Path) -> bool {
        let mut passed = self.report(file, self.xml.label(), self.xml.run(file, self.timeout));
        if self.svgcheck {
            let verdict = check::svgcheck(file, self.verbose, self.timeout);
            passed &= self.report(file, "svgcheck", verdict);
        }
        if self.render {
            passed &= self.report(file, "usvg", check::render(file));
        }
        passed
    }

    fn report(&self, file: &Path, label: &str, verdict: Verdict) -> bool {
        if verdict == Verdict::TimedOut {
            status_warning(&format!("{}: Timeout", file.display()));
        }
        if self.verbose
            && let Some(detail) = verdict.detail()
        {
            println!("{}", detail.if_supports_color(Stdout, |d| d.dimmed()));
        }
        println!("{}", check_line(verdict.passed(), label));
        verdict.passed()
    }
}

/// Every `*.svg` below `dir`, sorted.
pub fn collect_svgs(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        })
        .collect();
    files.sort();
    files
}

/// Validate all SVGs under `args.directory`.
pub fn validate_dir(args: &ValidateArgs, config: &CardforgeConfig) -> Result<ExitCode> {
    let directory = args
        .directory
        .canonicalize()
        .unwrap_or_else(|_| args.directory.clone());
    if !directory.is_dir() {
        log!("error"; "'{}' is not a directory", directory.display());
        return Ok(ExitCode::FAILURE);
    }

    log!("validate"; "validating svgs recursively in: {}", directory.display());
    let files = collect_svgs(&directory);
    if files.is_empty() {
        log!("validate"; "no svg files found");
        return Ok(ExitCode::SUCCESS);
    }

    let checks = Checks {
        xml: XmlCheck::resolve(args.xml_checker),
        svgcheck: config.validate.svgcheck,
        render: config.validate.render,
        verbose: args.verbose || crate::logger::is_verbose(),
        timeout: config.validate.timeout(),
    };

    let mut report = ValidationReport::default();
    for file in &files {
        println!("=== Checking {} ===", file.display());
        let passed = checks.run(file);
        report.record(file, passed);
        println!();
    }

    log!("validate"; "{report}");
    report.print();
    Ok(report.exit_code())
}
