//! Exit-code contract of `cardforge validate`, driven through the built binary.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn validate(dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cardforge"))
        .args(["--color", "never", "validate", "--xml-checker", "builtin"])
        .arg(dir)
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn test_one_good_one_malformed() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("AS.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"/>"#,
    )
    .unwrap();
    fs::create_dir(temp.path().join("sm")).unwrap();
    fs::write(temp.path().join("sm/KH.svg"), "<svg><g></svg>").unwrap();

    let output = validate(temp.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout.matches("=== Checking").count(), 2);
    assert_eq!(stdout.matches("xml: PASS").count(), 1);
    assert_eq!(stdout.matches("xml: FAIL").count(), 1);
    assert!(stdout.contains("Some SVGs failed"));
}

#[test]
fn test_all_good() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("1J.svg"), "<svg/>").unwrap();

    let output = validate(temp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("All SVGs passed validation!"));
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().unwrap();

    let output = validate(temp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("no svg files found"));
}

#[test]
fn test_not_a_directory() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("card.svg");
    fs::write(&file, "<svg/>").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cardforge"))
        .args(["validate"])
        .arg(&file)
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_bad_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_cardforge"))
        .args(["validate", "--xml-checker", "nope", "."])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
