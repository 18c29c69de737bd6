use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MCDONALDS: &str = "Date,Name,Custom Name,Amount\n2023-03-11,McDonald's,,17.58\n";

/// Run the binary with config and home isolated in `dir`
fn splitr(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("splitr").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("SPLITR_CONFIG_DIR", dir.path().join("config"))
        .env_remove("CLIENT_ID")
        .env_remove("CLIENT_SECRET")
        .env_remove("client_id")
        .env_remove("client_secret");
    cmd
}

fn write_csv(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("export.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    splitr(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Splitwise"));
}

#[test]
fn test_filename_required() {
    let dir = TempDir::new().unwrap();
    splitr(&dir).assert().failure();
}

#[test]
fn test_dry_run_needs_no_credentials() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, MCDONALDS);

    splitr(&dir)
        .arg(&csv)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-03-11T00:00:00"))
        .stdout(predicate::str::contains("McDonald's"))
        .stdout(predicate::str::contains("owes 8.79"))
        .stdout(predicate::str::contains("1 expense(s) planned"));

    assert!(!dir.path().join(".splitwise-credentials").exists());
}

#[test]
fn test_import_subcommand_with_date_format() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "Date,Name,Custom Name,Amount\n3/11/2023,Target,Groceries,20.00\n",
    );

    splitr(&dir)
        .arg("import")
        .arg(&csv)
        .args(["--dry-run", "--date-format", "%m/%d/%Y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-03-11T00:00:00  Groceries  20.00 USD"));
}

#[test]
fn test_bad_row_fails() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "Date,Name,Custom Name,Amount\n2023-03-11,Lunch,,lots\n",
    );

    splitr(&dir)
        .arg(&csv)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();

    splitr(&dir)
        .arg(dir.path().join("nope.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_missing_credentials() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, MCDONALDS);

    splitr(&dir)
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CLIENT_ID"));
}

#[test]
fn test_unreachable_token_endpoint_is_authentication_error() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, MCDONALDS);
    let config_dir = dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"token_url": "http://127.0.0.1:9/oauth/token", "base_url": "http://127.0.0.1:9/api/v3.0/"}"#,
    )
    .unwrap();

    splitr(&dir)
        .arg(&csv)
        .env("CLIENT_ID", "id")
        .env("CLIENT_SECRET", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));

    assert!(!dir.path().join(".splitwise-credentials").exists());
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();

    splitr(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(".splitwise-credentials"))
        .stdout(predicate::str::contains("Date format:       %Y-%m-%d"));
}

#[test]
fn test_config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();

    splitr(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote settings"));

    assert!(dir.path().join("config").join("config.json").exists());
}

#[test]
fn test_expenses_requires_scope() {
    let dir = TempDir::new().unwrap();

    splitr(&dir)
        .args(["expenses", "--group", "1", "--friend", "2"])
        .assert()
        .failure();
}
