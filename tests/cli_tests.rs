//! Integration tests for the esx-photos binary.

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn esx_photos_cmd(current_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("esx-photos");
    cmd.current_dir(current_dir.path());
    cmd
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    esx_photos_cmd(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("esx-photos"));
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    esx_photos_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ekahau"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_extracts_into_ap_images_in_current_dir() {
    let temp = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .entry("notes.json", CLOSET_NOTES)
        .images(&["i1", "i2"])
        .write(temp.path(), "survey.esx");

    esx_photos_cmd(&temp)
        .arg(&project)
        .arg("--work-dir")
        .arg(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracting AP picture notes"))
        .stdout(predicate::str::contains("Time to run:"));

    let images = temp.path().join("AP-Images");
    assert!(images.join("Closet-A-1.png").is_file());
    assert!(images.join("Closet-A-2.png").is_file());
    assert!(is_empty_dir(work.path()));
}

#[test]
fn test_output_flag_and_report() {
    let temp = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .entry("notes.json", CLOSET_NOTES)
        .entry("access_points.json", AP_100)
        .images(&["i1", "i2"])
        .write(temp.path(), "survey.esx");

    esx_photos_cmd(&temp)
        .arg(&project)
        .args(["--output", "photos", "--report", "--quiet"])
        .assert()
        .success();

    let photos = temp.path().join("photos");
    assert!(photos.join("AP-100-1.png").is_file());
    assert!(photos.join("AP-100-2.png").is_file());

    let report: serde_json::Value =
        serde_json::from_slice(&std::fs::read(photos.join("extraction_report.json")).unwrap())
            .unwrap();
    assert_eq!(report["strategy"], "access_point_only");
    assert_eq!(report["summary"]["images_copied"], 2);
}

#[test]
fn test_missing_project_exit_code() {
    let temp = TempDir::new().unwrap();
    esx_photos_cmd(&temp)
        .arg("absent.esx")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("absent.esx"));
}

#[test]
fn test_missing_notes_exit_code() {
    let temp = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .images(&["i1"])
        .write(temp.path(), "survey.esx");

    esx_photos_cmd(&temp)
        .arg(&project)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("notes.json"));

    assert!(!temp.path().join("AP-Images").exists());
}

#[test]
fn test_missing_image_exit_code() {
    let temp = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .entry("notes.json", CLOSET_NOTES)
        .images(&["i1"])
        .write(temp.path(), "survey.esx");

    esx_photos_cmd(&temp)
        .arg(&project)
        .arg("--work-dir")
        .arg(work.path())
        .assert()
        .code(7);

    assert!(is_empty_dir(work.path()));
}

#[test]
fn test_dry_run_copies_nothing() {
    let temp = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .entry("notes.json", CLOSET_NOTES)
        .images(&["i1", "i2"])
        .write(temp.path(), "survey.esx");

    esx_photos_cmd(&temp)
        .arg(&project)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Closet-A-1.png"))
        .stdout(predicate::str::contains("2 image(s) planned"));

    assert!(!temp.path().join("AP-Images").exists());
}

#[test]
fn test_generate_config() {
    let temp = TempDir::new().unwrap();
    esx_photos_cmd(&temp)
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("esx-photos.toml"));

    let content = std::fs::read_to_string(temp.path().join("esx-photos.toml")).unwrap();
    assert!(content.contains("directory_name = \"AP-Images\""));
}

#[test]
fn test_invalid_extension_is_config_error() {
    let temp = TempDir::new().unwrap();
    esx_photos_cmd(&temp)
        .args(["survey.esx", "--extension", "p.n/g"])
        .assert()
        .code(2);
}

#[test]
fn test_json_output_is_one_record_per_line() {
    let temp = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .entry("notes.json", CLOSET_NOTES)
        .entry("access_points.json", AP_100)
        .images(&["i1", "i2"])
        .write(temp.path(), "survey.esx");

    let output = esx_photos_cmd(&temp)
        .arg(&project)
        .args(["--output-format", "json", "-v"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| {
            serde_json::from_str(line).unwrap_or_else(|e| panic!("not a JSON record: {line:?} ({e})"))
        })
        .collect();

    let report = records
        .iter()
        .find(|r| r["type"] == "report")
        .expect("report record");
    assert_eq!(report["summary"]["images_copied"], 2);
    assert!(records.iter().any(|r| r["type"] == "completed"));
}

#[test]
fn test_json_dry_run_plan_is_one_record() {
    let temp = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .entry("notes.json", CLOSET_NOTES)
        .images(&["i1", "i2"])
        .write(temp.path(), "survey.esx");

    let output = esx_photos_cmd(&temp)
        .arg(&project)
        .args(["--output-format", "json", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let plans: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .filter(|r| r["type"] == "plan")
        .collect();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["copies"].as_array().unwrap().len(), 2);
}

#[test]
fn test_quiet_plain_success_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let project = ProjectBuilder::new()
        .entry("notes.json", CLOSET_NOTES)
        .images(&["i1", "i2"])
        .write(temp.path(), "survey.esx");

    esx_photos_cmd(&temp)
        .arg(&project)
        .args(["--output-format", "plain", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("AP-Images").join("Closet-A-1.png").is_file());
}
