//! End-to-end tests of the `cardsheet` binary.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::{CARD_SIZE, Workspace};

fn cardsheet(ws: &Workspace) -> Command {
    let mut cmd = Command::cargo_bin("cardsheet").unwrap();
    cmd.current_dir(ws.root())
        .env_remove("CARDSHEET_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help() {
    let ws = Workspace::new();
    cardsheet(&ws)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--no-clobber"));
}

#[test]
fn test_creates_output_pdf() {
    let ws = Workspace::new();
    ws.cards_n(4, CARD_SIZE);

    cardsheet(&ws)
        .arg("cards")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 accepted, 0 rejected"))
        .stdout(predicate::str::contains("Wrote 1 page(s)"));

    assert!(ws.output_pdf().exists());
}

#[test]
fn test_lists_rejections() {
    let ws = Workspace::new();
    ws.cards_n(1, CARD_SIZE);
    ws.png("tiny.png", (10, 10), None);

    cardsheet(&ws)
        .args(["cards", "--sort"])
        .assert()
        .success()
        .stderr(predicate::str::contains("tiny.png: Invalid dimensions 10x10"));
}

#[test]
fn test_quiet_still_lists_rejections() {
    let ws = Workspace::new();
    ws.cards_n(1, CARD_SIZE);
    ws.png("tiny.png", (10, 10), None);

    cardsheet(&ws)
        .args(["cards", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("tiny.png: Invalid dimensions 10x10"));
}

#[test]
fn test_no_accepted_images_fails() {
    let ws = Workspace::new();
    ws.png("tiny.png", (10, 10), None);

    cardsheet(&ws)
        .arg("cards")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No valid images found"));

    assert!(!ws.output_pdf().exists());
}

#[test]
fn test_no_clobber() {
    let ws = Workspace::new();
    ws.cards_n(1, CARD_SIZE);
    std::fs::create_dir_all(ws.output_pdf().parent().unwrap()).unwrap();
    std::fs::write(ws.output_pdf(), b"keep").unwrap();

    cardsheet(&ws)
        .args(["cards", "--no-clobber"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read(ws.output_pdf()).unwrap(), b"keep");
}

#[test]
fn test_dry_run() {
    let ws = Workspace::new();
    ws.cards_n(10, CARD_SIZE);

    cardsheet(&ws)
        .args(["cards", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write 2 page(s)"));

    assert!(!ws.output_pdf().exists());
}

#[test]
fn test_json_report() {
    let ws = Workspace::new();
    ws.cards_n(2, CARD_SIZE);
    ws.png("tiny.png", (10, 10), None);

    let output = cardsheet(&ws)
        .args(["cards", "--json", "--sort"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["pages"], 1);
    assert_eq!(report["summary"]["totalCandidates"], 3);
    assert_eq!(report["summary"]["accepted"].as_array().unwrap().len(), 2);
    assert_eq!(
        report["summary"]["rejected"][0]["reason"]["kind"],
        "invalidDimensions"
    );

    let accepted = report["summary"]["accepted"][0].as_str().unwrap();
    assert!(std::path::Path::new(accepted).is_absolute());
    assert!(std::path::Path::new(report["output"].as_str().unwrap()).is_absolute());
    assert!(ws.output_pdf().exists());
}

#[test]
fn test_json_report_when_nothing_is_accepted() {
    let ws = Workspace::new();
    ws.png("tiny.png", (10, 10), None);

    let output = cardsheet(&ws).args(["cards", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No valid images found"));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["pages"], 0);
    assert!(report["output"].is_null());
    assert_eq!(report["summary"]["totalCandidates"], 1);
    assert_eq!(
        report["summary"]["rejected"][0]["reason"]["kind"],
        "invalidDimensions"
    );
    let rejected = report["summary"]["rejected"][0]["path"].as_str().unwrap();
    assert!(rejected.ends_with("tiny.png"));
    assert!(std::path::Path::new(rejected).is_absolute());
    assert!(!ws.output_pdf().exists());
}

#[test]
fn test_config_file_is_discovered() {
    let ws = Workspace::new();
    ws.png("small.png", (25, 35), None);
    std::fs::write(
        ws.root().join("cardsheet.toml"),
        r#"
[folders]
input_paths = ["cards"]

[image_specs]
valid_dimensions = [[25, 35]]

[pdf_output]
output_dir = "sheets"
"#,
    )
    .unwrap();

    cardsheet(&ws).assert().success();

    assert!(ws.root().join("sheets/output.pdf").exists());
}

#[test]
fn test_malformed_config_fails() {
    let ws = Workspace::new();
    std::fs::write(ws.root().join("broken.toml"), "[folders\n").unwrap();

    cardsheet(&ws)
        .args(["cards", "--config", "broken.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_bad_size_flag() {
    let ws = Workspace::new();
    cardsheet(&ws)
        .args(["cards", "--size", "big"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WIDTHxHEIGHT"));
}
