#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn run_cli(data_dir: &TempDir, script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env("REFEREE_SCHEDULER_DATA_DIR", data_dir.path())
        .env("REFEREE_SCHEDULER_BACKEND", "json")
        .env_remove("RUST_LOG")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_runs_the_full_form_flow() {
    let dir = TempDir::new().unwrap();
    let script = "add-referee\nAlice Smith\nSoccer\nadd-game\n1\nCup Final\nassign\n1\nAlice Smith\nfeedback\n1\nAlice Smith\nGreat call\ngames\nquit\n";
    run_cli(&dir, script)
        .success()
        .stdout(str_contains("OK: Referee added successfully."))
        .stdout(str_contains("OK: Game added successfully."))
        .stdout(str_contains("OK: Referee assigned successfully"))
        .stdout(str_contains("OK: Feedback added successfully."))
        .stdout(str_contains("| 1       | Cup Final | Alice Smith       |"));

    let games = fs::read_to_string(dir.path().join("games.json")).unwrap();
    assert!(games.contains("Alice Smith"));
}

#[test]
fn cli_reports_missing_targets() {
    let dir = TempDir::new().unwrap();
    run_cli(
        &dir,
        "add-referee\nAlice\nSoccer\nassign\n999\nAlice\nremove-game\n999\nquit\n",
    )
    .success()
    .stdout(str_contains("Error: Referee not found or Game not found"))
    .stdout(str_contains("Error: Game not found."));
}

#[test]
fn cli_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, "add-referee\nBob\nRugby\nexit\n").success();

    let assert = run_cli(&dir, "referees\nremove-referee\nBob\nreferees\nquit\n").success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let (before, after) = output
        .split_once("Referee removed successfully.")
        .expect("removal message");
    assert!(before.contains("| Bob  | Rugby     | true         |"));
    assert!(!after.contains("Bob"));
}

#[test]
fn cli_exports_tables_to_csv() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("referees.csv");
    let script = format!(
        "add-referee\nCarla\nBasketball\nexport referees {}\nquit\n",
        csv_path.display()
    );
    run_cli(&dir, &script)
        .success()
        .stdout(str_contains("Exported referees to"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    assert!(contents.starts_with("Name,Expertise,Availability"));
    assert!(contents.contains("Carla,Basketball,true"));
}

#[test]
fn cli_rejects_unknown_backend() {
    let dir = TempDir::new().unwrap();
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env("REFEREE_SCHEDULER_DATA_DIR", dir.path())
        .env("REFEREE_SCHEDULER_BACKEND", "spreadsheet")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(str_contains("unknown storage backend"));
}
