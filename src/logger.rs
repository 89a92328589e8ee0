//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only appears under `--verbose`
//! - `status_*` helpers for per-item check marks (validation, downloads)
//!
//! # Example
//!
//! ```ignore
//! log!("atlasnye"; "found {} potential svg files", count);
//! debug!("classify"; "ignored: {}", name);
//! ```

use owo_colors::{OwoColorize, Stream::Stdout};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let paint = |prefix: &String| match module_lower {
        "validate" => prefix.bright_blue().bold().to_string(),
        "saved" | "done" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    };
    format!("[{module}]").if_supports_color(Stdout, paint).to_string()
}

// ============================================================================
// Item Status (indented check marks)
// ============================================================================

fn green(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.green()).to_string()
}

fn red(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.red()).to_string()
}

/// Format a pass/fail line: `  ✓ xmllint: PASS`.
pub fn check_line(passed: bool, label: &str) -> String {
    if passed {
        format!("  {} {}: {}", green("✓"), label, green("PASS"))
    } else {
        format!("  {} {}: {}", red("✗"), label, red("FAIL"))
    }
}

/// Print an indented success line for one item.
pub fn status_success(message: &str) {
    println!("  {} {}", green("✓"), message);
}

/// Print an indented error line for one item, with optional detail.
pub fn status_error(summary: &str, detail: &str) {
    if detail.is_empty() {
        println!("  {} {}", red("✗"), summary);
    } else {
        let detail = detail.if_supports_color(Stdout, |d| d.dimmed());
        println!("  {} {}: {}", red("✗"), summary, detail);
    }
}

/// Print an indented warning line for one item.
pub fn status_warning(detail: &str) {
    let mark = "⚠".if_supports_color(Stdout, |m| m.yellow());
    println!("  {mark} {detail}");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_line_labels() {
        owo_colors::set_override(false);
        assert_eq!(check_line(true, "xmllint"), "  ✓ xmllint: PASS");
        assert_eq!(check_line(false, "svgcheck"), "  ✗ svgcheck: FAIL");
    }

    #[test]
    fn test_prefix_contains_module() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("ddl", "ddl"), "[ddl]");
    }
}
