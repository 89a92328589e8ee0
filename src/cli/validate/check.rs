//! Individual checks run against one SVG file.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::cli::XmlChecker;
use crate::debug;
use crate::svg::dom;
use crate::utils::exec::{Cmd, Outcome};

/// Result of one check on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failed, with whatever the checker reported.
    Fail(String),
    TimedOut,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// Checker output worth showing under `--verbose`.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Verdict::Fail(detail) if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// Well-formedness checker resolved for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlCheck {
    Xmllint(PathBuf),
    Builtin,
}

impl XmlCheck {
    /// `auto` falls back to the builtin parser when `xmllint` is not on `PATH`.
    pub fn resolve(choice: XmlChecker) -> Self {
        match choice {
            XmlChecker::Builtin => XmlCheck::Builtin,
            XmlChecker::Xmllint => {
                XmlCheck::Xmllint(which::which("xmllint").unwrap_or_else(|_| "xmllint".into()))
            }
            XmlChecker::Auto => match which::which("xmllint") {
                Ok(path) => XmlCheck::Xmllint(path),
                Err(_) => {
                    debug!("validate"; "xmllint not found, using builtin xml check");
                    XmlCheck::Builtin
                }
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            XmlCheck::Xmllint(_) => "xmllint",
            XmlCheck::Builtin => "xml",
        }
    }

    pub fn run(&self, file: &Path, timeout: Duration) -> Verdict {
        match self {
            XmlCheck::Xmllint(program) => external(
                Cmd::new(program).arg("--noout").arg(file).timeout(timeout),
            ),
            XmlCheck::Builtin => builtin_xml(file),
        }
    }
}

/// Parse with the crate's own SVG reader.
pub fn builtin_xml(file: &Path) -> Verdict {
    match fs::read_to_string(file) {
        Ok(text) => match dom::parse(&text) {
            Ok(_) => Verdict::Pass,
            Err(err) => Verdict::Fail(err.to_string()),
        },
        Err(err) => Verdict::Fail(err.to_string()),
    }
}

/// `svgcheck`, quiet unless verbose.
pub fn svgcheck(file: &Path, verbose: bool, timeout: Duration) -> Verdict {
    let quiet = if verbose { "" } else { "--quiet" };
    external(Cmd::new("svgcheck").arg(quiet).arg(file).timeout(timeout))
}

/// Build a render tree with `usvg`.
pub fn render(file: &Path) -> Verdict {
    let data = match fs::read(file) {
        Ok(data) => data,
        Err(err) => return Verdict::Fail(err.to_string()),
    };
    match usvg::Tree::from_data(&data, &usvg::Options::default()) {
        Ok(_) => Verdict::Pass,
        Err(err) => Verdict::Fail(err.to_string()),
    }
}

fn external(cmd: Cmd) -> Verdict {
    match cmd.run() {
        Ok(Outcome::TimedOut) => Verdict::TimedOut,
        Ok(outcome) if outcome.success() => Verdict::Pass,
        Ok(outcome) => Verdict::Fail(outcome.diagnostics()),
        Err(err) => Verdict::Fail(format!("{err:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(temp: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_builtin_xml() {
        let temp = TempDir::new().unwrap();
        let good = write(&temp, "good.svg", r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#);
        let bad = write(&temp, "bad.svg", "<svg><g></svg>");

        assert!(builtin_xml(&good).passed());
        assert!(builtin_xml(&bad).detail().is_some());
        assert!(!builtin_xml(&temp.path().join("missing.svg")).passed());

        let trailing = write(&temp, "trailing.svg", "<svg/>this is not xml");
        let entity = write(&temp, "entity.svg", "<svg>&nbsp;</svg>");
        assert!(!builtin_xml(&trailing).passed());
        assert!(!builtin_xml(&entity).passed());
    }

    #[test]
    fn test_render() {
        let temp = TempDir::new().unwrap();
        let good = write(
            &temp,
            "good.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="5" height="5"/></svg>"#,
        );
        let bad = write(&temp, "bad.svg", "not svg at all");

        assert!(render(&good).passed());
        assert!(!render(&bad).passed());
    }

    #[test]
    fn test_forced_builtin() {
        assert_eq!(XmlCheck::resolve(XmlChecker::Builtin), XmlCheck::Builtin);
        assert_eq!(XmlCheck::Builtin.label(), "xml");
    }

    #[test]
    fn test_missing_program_fails() {
        let verdict = external(Cmd::new("cardforge-no-such-validator").arg("x.svg"));
        assert!(matches!(verdict, Verdict::Fail(_)));
    }
}
