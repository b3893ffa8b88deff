use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn coa(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("coa").unwrap();
    cmd.env("COA_LEDGER_DATA_DIR", temp_dir.path())
        .env_remove("COA_LEDGER_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn seed(temp_dir: &TempDir) {
    for (number, label) in [("1000", "Assets"), ("1100", "Cash"), ("1110", "Petty")] {
        coa(temp_dir)
            .args(["account", "add", number, label])
            .assert()
            .success();
    }
}

#[test]
fn test_post_cascades_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    coa(&temp_dir)
        .args(["post", "1110", "20.00", "D", "--memo", "top-up"])
        .assert()
        .success();

    let accounts = fs::read_to_string(temp_dir.path().join("data").join("accounts.txt")).unwrap();
    assert_eq!(accounts, "1000 Assets 20.00\n1100 Cash 20.00\n1110 Petty 20.00\n");

    let postings =
        fs::read_to_string(temp_dir.path().join("data").join("accounts_postings.txt")).unwrap();
    assert!(postings.starts_with("1110|T"));
    assert!(postings.trim_end().ends_with("|top-up"));

    coa(&temp_dir)
        .args(["delete-posting", "1110", "0"])
        .assert()
        .success();

    let accounts = fs::read_to_string(temp_dir.path().join("data").join("accounts.txt")).unwrap();
    assert_eq!(accounts, "1000 Assets 0.00\n1100 Cash 0.00\n1110 Petty 0.00\n");
}

#[test]
fn test_tree_output() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    coa(&temp_dir)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("1000 Assets"))
        .stdout(predicate::str::contains("  1100 Cash"))
        .stdout(predicate::str::contains("    1110 Petty"));
}

#[test]
fn test_explicit_file_option() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("chart.txt");
    fs::write(&file, "1 Assets 5.00\n12 Bank 5.00\n").unwrap();

    let output = coa(&temp_dir)
        .args(["--file", file.to_str().unwrap(), "find", "12"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("Level:     1"));
}

#[test]
fn test_errors_fail_the_command() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    coa(&temp_dir)
        .args(["account", "add", "1100", "Again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    coa(&temp_dir)
        .args(["post", "1110", "5", "X"])
        .assert()
        .failure();

    coa(&temp_dir)
        .args(["account", "add", "1345", "Gap"])
        .assert()
        .failure();
}

#[test]
fn test_report_file() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);
    coa(&temp_dir)
        .args(["post", "1110", "7.5", "C"])
        .assert()
        .success();

    let report = temp_dir.path().join("petty.txt");
    coa(&temp_dir)
        .args(["report", "1110", "--output", report.to_str().unwrap(), "--sort", "date"])
        .assert()
        .success();

    let contents = fs::read_to_string(report).unwrap();
    assert!(contents.starts_with("1110 Petty -$7.50\n"));
    assert!(contents.contains("Transactions:\n  #0"));
}

#[test]
fn test_shell_keeps_going_and_exits_zero() {
    let temp_dir = TempDir::new().unwrap();

    let output = coa(&temp_dir)
        .arg("shell")
        .write_stdin("add 1 Assets\npost 99 1 D\nadd 11 Cash\npost 11 2 D\nprint\nexit\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Error: Account not found: 99"));
    assert!(text.contains("1 Assets 2.00\n  11 Cash 2.00"));
}

#[test]
fn test_config_command() {
    let temp_dir = TempDir::new().unwrap();
    coa(&temp_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("accounts_postings.txt"));
}
