//! Integration tests for the typographe CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn typographe() -> Command {
    Command::cargo_bin("typographe").unwrap()
}

#[test]
fn test_fix_french_stdin() {
    typographe()
        .args(["fix", "-q"])
        .write_stdin("Il dit: Bonjour !")
        .assert()
        .success()
        .stdout("Il dit\u{a0}: Bonjour\u{202f}!");
}

#[test]
fn test_fix_english_profile() {
    typographe()
        .args(["fix", "-q", "-p", "en-US"])
        .write_stdin("Il dit: Bonjour !")
        .assert()
        .success()
        .stdout("Il dit: Bonjour!");
}

#[test]
fn test_fix_json_output() {
    typographe()
        .args(["fix", "-q", "-f", "json"])
        .write_stdin("au 19e si\u{e8}cle")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file\": \"-\""))
        .stdout(predicate::str::contains("\"changed\": true"))
        .stdout(predicate::str::contains("XIXe\u{a0}si\u{e8}cle"))
        .stdout(predicate::str::contains("century-numeral"))
        .stdout(predicate::str::contains("superscript-ordinal"))
        .stdout(predicate::str::contains("\"diagnostics\": []"));
}

#[test]
fn test_fix_files_concatenate_in_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.txt");
    let second = temp_dir.path().join("b.txt");
    fs::write(&first, "Oui !").unwrap();
    fs::write(&second, "Non ?").unwrap();

    typographe()
        .args(["fix", "-q", "-i"])
        .arg(temp_dir.path().join("*.txt"))
        .assert()
        .success()
        .stdout("Oui\u{202f}!Non\u{202f}?");
}

#[test]
fn test_fix_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("doc.txt");
    let output = temp_dir.path().join("out.txt");
    fs::write(&input, "Elle a dit oui !").unwrap();

    typographe()
        .args(["fix", "-q", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "Elle a dit oui\u{202f}!");
}

#[test]
fn test_fix_output_rejects_multiple_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.txt");
    let second = temp_dir.path().join("b.txt");
    fs::write(&first, "Oui !").unwrap();
    fs::write(&second, "Non ?").unwrap();

    typographe()
        .args(["fix", "-q", "-i"])
        .arg(&first)
        .arg("-i")
        .arg(&second)
        .arg("-o")
        .arg(temp_dir.path().join("out.txt"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("single input"));
}

#[test]
fn test_fix_in_place_rewrites_and_settles() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.txt");
    fs::write(&path, "Elle a dit oui !").unwrap();

    typographe()
        .args(["fix", "-q", "--in-place", "-i"])
        .arg(&path)
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Elle a dit oui\u{202f}!"
    );

    // Second run finds nothing left to do
    typographe()
        .args(["fix", "-q", "--in-place", "-i"])
        .arg(&path)
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Elle a dit oui\u{202f}!"
    );
}

#[test]
fn test_fix_in_place_rejects_stdin() {
    typographe()
        .args(["fix", "-q", "--in-place"])
        .write_stdin("Oui !")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("stdin"));
}

#[test]
fn test_fix_restricted_to_one_pass() {
    typographe()
        .args(["fix", "-q", "--pass", "numbers"])
        .write_stdin("1234567 personnes arrivent !")
        .assert()
        .success()
        .stdout("1\u{202f}234\u{202f}567 personnes arrivent !");
}

#[test]
fn test_check_reports_dirty_documents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.txt");
    fs::write(&path, "Bonjour !").unwrap();

    typographe()
        .args(["check", "-i"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would fix:"))
        .stdout(predicate::str::contains("1 of 1 documents would change"));

    // The file itself is left alone
    assert_eq!(fs::read_to_string(&path).unwrap(), "Bonjour !");
}

#[test]
fn test_check_passes_clean_documents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.txt");
    fs::write(&path, "Rien\u{202f}!").unwrap();

    typographe()
        .args(["check", "-i"])
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("clean:"))
        .stdout(predicate::str::contains("0 of 1 documents would change"));
}

#[test]
fn test_check_stdin_exit_code() {
    typographe()
        .arg("check")
        .write_stdin("Bonjour !")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would fix: -"));
}

#[test]
fn test_check_quiet_prints_nothing() {
    typographe()
        .args(["check", "-q"])
        .write_stdin("Bonjour !")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_config_file_selects_profile() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("typographe.toml");
    fs::write(&config, "version = 1\n\n[profile]\nid = \"en-US\"\n").unwrap();

    typographe()
        .args(["fix", "-q", "-c"])
        .arg(&config)
        .write_stdin("Il dit: Bonjour !")
        .assert()
        .success()
        .stdout("Il dit: Bonjour!");
}

#[test]
fn test_config_styles_reach_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("typographe.toml");
    fs::write(
        &config,
        "version = 1\n\n[styles]\n\"superscript-ordinal\" = \"Exposant\"\n",
    )
    .unwrap();

    typographe()
        .args(["fix", "-q", "-f", "json", "-c"])
        .arg(&config)
        .write_stdin("au 19e si\u{e8}cle")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"style\": \"Exposant\""));
}

#[test]
fn test_unsupported_config_version_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("typographe.toml");
    fs::write(&config, "version = 99\n").unwrap();

    typographe()
        .args(["fix", "-q", "-c"])
        .arg(&config)
        .write_stdin("Oui !")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("version"));
}

#[test]
fn test_unknown_profile_fails() {
    typographe()
        .args(["fix", "-q", "-p", "xx-XX"])
        .write_stdin("Oui !")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("xx-XX"));
}

#[test]
fn test_missing_input_file() {
    typographe()
        .args(["fix", "-q", "-i", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_list_profiles() {
    typographe()
        .args(["list", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fr-FR"))
        .stdout(predicate::str::contains("Fran\u{e7}ais (France)"))
        .stdout(predicate::str::contains("en-US"))
        .stdout(predicate::str::contains("English (US)"));
}

#[test]
fn test_list_passes() {
    typographe()
        .args(["list", "passes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spacing"))
        .stdout(predicate::str::contains("numbers"))
        .stdout(predicate::str::contains("iterate-to-fixpoint"));
}

#[test]
fn test_generate_config_to_stdout() {
    typographe()
        .arg("generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("version = 1"))
        .stdout(predicate::str::contains("[styles]"));
}

#[test]
fn test_help_command() {
    typographe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("typographic correction"));
}
