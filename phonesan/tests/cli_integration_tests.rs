//! Integration tests for the `phonesan` binary.
//!
//! Every command runs inside its own temporary directory with the config
//! environment cleared, so a developer's own `phonesan.yaml` or
//! `PHONESAN_*` variables never leak into the assertions. The blacklist is
//! served by a local `mockito` server.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use test_log::test;

use phonesan_core::read_table_from_path;

const MAILING_CSV: &str = "Nome;Telefone;;Destino\n\
Ana;+55 (11) 91234-5678;x;(21) 98765-4321\n\
Bia;1234;y;+55 47 3456-7890\n\
Caio;(11) 3456-7890;z;\n";

/// Builds a `phonesan` command isolated inside `dir`.
fn phonesan_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("phonesan"));
    cmd.current_dir(dir);
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd.env_remove("PHONESAN_BLACKLIST_URL");
    cmd.env_remove("PHONESAN_CONFIG");
    cmd.env_remove("PHONESAN_ALLOW_DEBUG_PII");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_sanitize_writes_cleaned_workbook() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, "mailing.csv", MAILING_CSV)?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/blacklist.csv")
        .with_status(200)
        .with_body("5521987654321\n")
        .create();

    let assert = phonesan_cmd(dir.path())
        .args(["sanitize", "--json", "--blacklist-url"])
        .arg(format!("{}/blacklist.csv", server.url()))
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Empty columns were renamed to empty1"))
        .stderr(predicate::str::contains("Telefone, Destino"))
        .stderr(predicate::str::contains("Removed by blacklist"));
    mock.assert();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let json: Value = serde_json::from_str(&stdout)?;
    let stats = &json[0]["report"]["stats"];
    assert_eq!(stats["valid"], 2);
    assert_eq!(stats["invalid"], 4);
    assert_eq!(stats["blacklisted"], 1);

    let output = dir.path().join("mailing_sanitized.xlsx");
    let loaded = read_table_from_path(&output, "empty")?;
    let table = loaded.table;
    assert_eq!(table.columns(), &["Nome", "Telefone", "empty1", "Destino"]);
    assert_eq!(table.rows()[0], vec!["Ana", "11912345678", "x", ""]);
    assert_eq!(table.rows()[1], vec!["Bia", "", "y", "4734567890"]);
    assert_eq!(table.rows()[2], vec!["Caio", "", "z", ""]);
    Ok(())
}

#[test]
fn test_sanitize_without_phone_columns_fails_without_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, "people.csv", "Nome,Cidade\nAna,Natal\n")?;

    phonesan_cmd(dir.path())
        .args(["sanitize", "--blacklist-url", "http://127.0.0.1:9/unused"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No phone column found"));

    assert!(!dir.path().join("mailing_sanitized.xlsx").exists());
    Ok(())
}

#[test]
fn test_sanitize_aborts_when_blacklist_is_unavailable() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, "mailing.csv", MAILING_CSV)?;

    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/blacklist.csv").with_status(500).create();

    phonesan_cmd(dir.path())
        .args(["sanitize", "--blacklist-url"])
        .arg(format!("{}/blacklist.csv", server.url()))
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Blacklist unavailable"));

    assert!(!dir.path().join("mailing_sanitized.xlsx").exists());
    Ok(())
}

#[test]
fn test_sanitize_rejects_unsupported_format() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, "mailing.txt", MAILING_CSV)?;

    phonesan_cmd(dir.path())
        .args(["sanitize", "--blacklist-url", "http://127.0.0.1:9/unused"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input format"));
    Ok(())
}

#[test]
fn test_sanitize_multiple_inputs_with_local_blacklist_and_prefix() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let first = write_input(&dir, "first.csv", "Celular,Nome\n11912345678,Ana\n")?;
    let second = write_input(&dir, "second.csv", "celular;nome\n(21) 98765-4321;Bia\n")?;
    let blacklist = write_input(&dir, "blacklist.csv", "21987654321\n")?;
    let out_dir = dir.path().join("out");

    phonesan_cmd(dir.path())
        .args(["--quiet", "sanitize", "--prefix", "cel", "--blacklist-file"])
        .arg(&blacklist)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg(&first)
        .arg(&second)
        .assert()
        .success();

    let first_out = read_table_from_path(out_dir.join("first_mailing_sanitized.xlsx"), "empty")?.table;
    let second_out = read_table_from_path(out_dir.join("second_mailing_sanitized.xlsx"), "empty")?.table;
    assert_eq!(first_out.cell(0, "Celular"), Some("11912345678"));
    assert_eq!(second_out.cell(0, "celular"), Some(""));
    assert_eq!(second_out.cell(0, "nome"), Some("Bia"));
    Ok(())
}

#[test]
fn test_sanitize_output_flag_requires_single_input() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let first = write_input(&dir, "a.csv", "tel\n11912345678\n")?;
    let second = write_input(&dir, "b.csv", "tel\n11912345678\n")?;

    phonesan_cmd(dir.path())
        .args(["sanitize", "-o", "out.xlsx", "--blacklist-url", "http://127.0.0.1:9/unused"])
        .arg(&first)
        .arg(&second)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output can only be used with a single input"));
    Ok(())
}

#[test]
fn test_config_file_in_working_directory_is_discovered() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("phonesan.yaml"), "phone_columns:\n  prefixes: [fone]\n")?;
    let input = write_input(&dir, "list.csv", "Fone,Telefone\n1,2\n")?;

    phonesan_cmd(dir.path())
        .arg("columns")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("* Fone\n"))
        .stdout(predicate::str::contains("  Telefone\n"));
    Ok(())
}

#[test]
fn test_check_prints_normalized_numbers() -> Result<()> {
    let dir = tempfile::tempdir()?;

    phonesan_cmd(dir.path())
        .args(["check", "+55 (11) 91234-5678", "1101234567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("11912345678"))
        .stdout(predicate::str::contains("Valid"))
        .stdout(predicate::str::contains("Invalid"));
    Ok(())
}

#[test]
fn test_columns_reports_missing_phone_columns() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, "people.csv", "Nome,Cidade\nAna,Natal\n")?;

    phonesan_cmd(dir.path())
        .arg("columns")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No phone column found (recognized prefixes: tel, des)"));
    Ok(())
}
