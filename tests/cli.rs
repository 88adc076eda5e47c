//! End-to-end tests for the `bellam` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MOBILE: &str = "9876543210";

fn bellam(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bellam").unwrap();
    cmd.env("BELLAM_DATA_DIR", data_dir.path())
        .env_remove("BELLAM_USER")
        .env_remove("BELLAM_PASSWORD");
    cmd
}

fn add_user(data_dir: &TempDir) {
    bellam(data_dir)
        .args(["user", "add", "asha", MOBILE, "--password", "secret1"])
        .assert()
        .success();
}

#[test]
fn init_creates_database_and_settings() {
    let data_dir = TempDir::new().unwrap();

    bellam(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(data_dir.path().join("config.json").exists());
    assert!(data_dir.path().join("data").join("database.json").exists());
}

#[test]
fn config_shows_paths() {
    let data_dir = TempDir::new().unwrap();

    bellam(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("database.json"))
        .stdout(predicate::str::contains("Currency symbol: ₹"));
}

#[test]
fn user_add_and_list() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    bellam(&data_dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("asha"))
        .stdout(predicate::str::contains(MOBILE))
        .stdout(predicate::str::contains("argon2").not());
}

#[test]
fn user_add_rejects_duplicate_mobile() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    bellam(&data_dir)
        .args(["user", "add", "ravi", MOBILE, "--password", "secret2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn record_commands_need_a_user() {
    let data_dir = TempDir::new().unwrap();

    bellam(&data_dir)
        .args(["member", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user selected"));

    bellam(&data_dir)
        .args(["--user", "1111111111", "member", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found"));
}

#[test]
fn members_emis_expenses_and_summary() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    bellam(&data_dir)
        .args(["--user", MOBILE, "member", "add", "Asha", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added member: Asha (₹1,000.00)"));

    bellam(&data_dir)
        .env("BELLAM_USER", MOBILE)
        .args(["emi", "add", "Phone", "200", "--period", "March 2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("for March 2026"));

    bellam(&data_dir)
        .env("BELLAM_USER", MOBILE)
        .args(["expense", "add", "Groceries", "500", "-p", "2026-03"])
        .assert()
        .success();

    // Outside the summarized month
    bellam(&data_dir)
        .env("BELLAM_USER", MOBILE)
        .args(["expense", "add", "Trip", "900", "-p", "2026-04"])
        .assert()
        .success();

    bellam(&data_dir)
        .env("BELLAM_USER", MOBILE)
        .args(["expense", "list", "--period", "2026-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Trip").not());

    // 1000 income, 700 spent: 30% saved is a B
    bellam(&data_dir)
        .env("BELLAM_USER", MOBILE)
        .args(["summary", "--period", "March 2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Summary - March 2026"))
        .stdout(predicate::str::contains("₹700.00"))
        .stdout(predicate::str::contains("30.0%"));

    bellam(&data_dir)
        .env("BELLAM_USER", MOBILE)
        .args(["summary", "--period", "March 2026", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"grade\": \"B\""))
        .stdout(predicate::str::contains("\"totalSpent\": 700"));
}

#[test]
fn remove_unknown_member_is_harmless() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    bellam(&data_dir)
        .args(["--user", MOBILE, "member", "remove", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing removed"));
}

#[test]
fn summary_without_members_has_no_grade() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    bellam(&data_dir)
        .args(["--user", MOBILE, "summary", "-p", "jan 2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No grade"));
}
