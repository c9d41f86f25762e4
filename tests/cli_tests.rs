use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{cli_init, cli_login, cli_register, promote, rtc, setup_test_db, temp_out};

const NOW: &str = "--now";

/// Fresh database with one signed-in admin.
fn signed_in_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    cli_init(&db_path);
    cli_register(&db_path, "ana@example.com", "Ana Lopez");
    cli_login(&db_path, "ana@example.com");
    db_path
}

fn clock(db_path: &str, args: &[&str], now: &str) -> assert_cmd::assert::Assert {
    let mut full = vec!["--db", db_path];
    full.extend_from_slice(args);
    full.extend_from_slice(&[NOW, now]);
    rtc().args(full).assert()
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rtc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_protected_commands_need_login() {
    let db_path = setup_test_db("cli_protected");
    cli_init(&db_path);

    rtc()
        .args(["--db", &db_path, "status"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));

    rtc()
        .args(["--db", &db_path, "report", "weekly"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));
}

#[test]
fn test_register_and_login() {
    let db_path = setup_test_db("cli_register_login");
    cli_init(&db_path);

    rtc()
        .args([
            "--db",
            &db_path,
            "register",
            "--email",
            "ana@example.com",
            "--password",
            "Secret123",
            "--name",
            "Ana Lopez",
        ])
        .assert()
        .success()
        .stdout(contains("Account created for ana@example.com (Admin)"));

    rtc()
        .args([
            "--db",
            &db_path,
            "login",
            "--email",
            "ana@example.com",
            "--password",
            "wrong-Pass1",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid email or password"));

    rtc()
        .args([
            "--db",
            &db_path,
            "login",
            "--email",
            "ana@example.com",
            "--password",
            "Secret123",
        ])
        .assert()
        .success()
        .stdout(contains("Welcome, Ana!"));

    rtc()
        .args(["--db", &db_path, "profile"])
        .assert()
        .success()
        .stdout(contains("ana@example.com").and(contains("Admin")));
}

#[test]
fn test_weak_password_is_rejected() {
    let db_path = setup_test_db("cli_weak_password");
    cli_init(&db_path);

    rtc()
        .args([
            "--db",
            &db_path,
            "register",
            "--email",
            "ana@example.com",
            "--password",
            "abcdefg1",
            "--name",
            "Ana Lopez",
        ])
        .assert()
        .failure()
        .stderr(contains("at least 8 characters"));
}

#[test]
fn test_full_work_day() {
    let db_path = signed_in_db("cli_full_day");

    clock(&db_path, &["in", "--yes"], "2025-06-02 09:00")
        .success()
        .stdout(contains("Work session started at 09:00"));

    clock(&db_path, &["pause", "--kind", "meal"], "2025-06-02 12:00")
        .success()
        .stdout(contains("meal break started at 12:00"));

    clock(&db_path, &["pause"], "2025-06-02 12:05")
        .failure()
        .stderr(contains("already in progress"));

    clock(&db_path, &["resume"], "2025-06-02 12:30")
        .success()
        .stdout(contains("Break ended after 30m"));

    clock(&db_path, &["status"], "2025-06-02 13:00")
        .success()
        .stdout(contains("working").and(contains("03:30:00")));

    clock(&db_path, &["out"], "2025-06-02 17:30")
        .success()
        .stdout(contains("Net time: 8h 0m"));

    clock(&db_path, &["in", "--yes"], "2025-06-02 18:00")
        .failure()
        .stderr(contains("only one session per day"));

    clock(&db_path, &["report", "daily", "--date", "2025-06-02"], "2025-06-02 20:00")
        .success()
        .stdout(contains("08:30:00").and(contains("08:00:00")));
}

#[test]
fn test_clock_in_can_be_declined() {
    let db_path = signed_in_db("cli_declined");

    rtc()
        .args(["--db", &db_path, "in", NOW, "2025-06-02 09:00"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("only one work session").and(contains("Clock-in cancelled.")));

    clock(&db_path, &["out"], "2025-06-02 17:00")
        .failure()
        .stderr(contains("No active work session"));
}

#[test]
fn test_status_json() {
    let db_path = signed_in_db("cli_status_json");

    clock(&db_path, &["in", "-y"], "2025-06-02 09:00").success();

    clock(&db_path, &["status", "--json"], "2025-06-02 10:00")
        .success()
        .stdout(contains("\"has_active_session\": true").and(contains("\"net_seconds\": 3600")));
}

#[test]
fn test_weekly_and_monthly_reports() {
    let db_path = signed_in_db("cli_reports");

    for day in ["2025-06-02", "2025-06-03"] {
        clock(&db_path, &["in", "-y"], &format!("{day} 09:00")).success();
        clock(&db_path, &["out"], &format!("{day} 18:00")).success();
    }

    clock(&db_path, &["report", "weekly"], "2025-06-04 12:00")
        .success()
        .stdout(contains("Days worked   : 2").and(contains("2h 0m")));

    clock(&db_path, &["report", "monthly", "--month", "6", "--year", "2025"], "2025-07-01 12:00")
        .success()
        .stdout(contains("Monthly report: 06/2025").and(contains("Net           : 18h 0m")));
}

#[test]
fn test_history_edit_and_delete() {
    let db_path = signed_in_db("cli_history");

    clock(&db_path, &["in", "-y"], "2025-06-02 09:00").success();
    clock(&db_path, &["out"], "2025-06-02 17:00").success();

    clock(&db_path, &["history"], "2025-06-03 09:00")
        .success()
        .stdout(contains("2025-06-02").and(contains("Page 1 of 1 (1 session(s)")));

    clock(&db_path, &["edit", "1", "--out", "18:00"], "2025-06-03 09:00")
        .failure()
        .stderr(contains("justification"));

    clock(
        &db_path,
        &["edit", "1", "--out", "18:00", "-j", "late deploy"],
        "2025-06-03 09:00",
    )
    .success()
    .stdout(contains("Session 1 updated").and(contains("09:00:00")));

    rtc()
        .args(["--db", &db_path, "log", "--print", "--op", "edit"])
        .assert()
        .success()
        .stdout(contains("late deploy"));

    clock(&db_path, &["del", "1", "--yes"], "2025-06-03 09:00")
        .success()
        .stdout(contains("has been deleted"));

    clock(&db_path, &["history"], "2025-06-03 09:00")
        .success()
        .stdout(contains("No sessions found"));
}

#[test]
fn test_employee_cannot_delete_or_edit() {
    let db_path = signed_in_db("cli_employee_rights");

    clock(&db_path, &["in", "-y"], "2025-06-02 09:00").success();
    clock(&db_path, &["out"], "2025-06-02 17:00").success();

    promote(&db_path, "ana@example.com", "employee");

    clock(&db_path, &["del", "1", "--yes"], "2025-06-03 09:00")
        .failure()
        .stderr(contains("Permission denied"));

    clock(&db_path, &["edit", "1", "--out", "18:00", "-j", "why"], "2025-06-03 09:00")
        .failure()
        .stderr(contains("Permission denied"));

    promote(&db_path, "ana@example.com", "supervisor");

    clock(&db_path, &["edit", "1", "--out", "18:00", "-j", "why"], "2025-06-03 09:00").success();
}

#[test]
fn test_history_export_csv() {
    let db_path = signed_in_db("cli_export");
    let out = temp_out("cli_export", "csv");

    clock(&db_path, &["in", "-y"], "2025-06-02 09:00").success();
    clock(&db_path, &["out"], "2025-06-02 17:00").success();

    rtc()
        .args([
            "--db", &db_path, "history", "--export", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("export file");
    assert!(content.contains("2025-06-02"));
    assert!(content.contains("completed"));
}

#[test]
fn test_logout_forgets_the_session() {
    let db_path = signed_in_db("cli_logout");

    rtc()
        .args(["--db", &db_path, "logout"])
        .assert()
        .success()
        .stdout(contains("Signed out."));

    rtc()
        .args(["--db", &db_path, "history"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));
}

#[test]
fn test_password_reset_flow() {
    let db_path = setup_test_db("cli_password_reset");
    cli_init(&db_path);
    cli_register(&db_path, "boss@example.com", "Marta Ruiz");
    cli_register(&db_path, "ana@example.com", "Ana Lopez");

    rtc()
        .args(["--db", &db_path, "password", "--forgot", "ana@example.com"])
        .assert()
        .success()
        .stdout(contains("request recorded").and(contains("Reset code").not()));

    // nobody signed in: no code for anyone
    rtc()
        .args(["--db", &db_path, "users", "--reset-code", "boss@example.com"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));

    cli_login(&db_path, "boss@example.com");

    let output = rtc()
        .args(["--db", &db_path, "users", "--reset-code", "ana@example.com"])
        .output()
        .expect("run users --reset-code");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let code = stdout
        .lines()
        .find_map(|l| l.split("Reset code for ana@example.com: ").nth(1))
        .map(|c| c.trim().to_string())
        .expect("reset code printed");

    rtc()
        .args([
            "--db", &db_path, "password", "--code", &code, "--new", "Changed123",
        ])
        .assert()
        .success()
        .stdout(contains("Password reset"));

    rtc()
        .args([
            "--db", &db_path, "password", "--code", &code, "--new", "Changed456",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid or expired reset code"));

    rtc()
        .args([
            "--db",
            &db_path,
            "login",
            "--email",
            "ana@example.com",
            "--password",
            "Changed123",
        ])
        .assert()
        .success();
}

#[test]
fn test_employee_cannot_issue_reset_codes() {
    let db_path = setup_test_db("cli_reset_employee");
    cli_init(&db_path);
    cli_register(&db_path, "boss@example.com", "Marta Ruiz");
    cli_register(&db_path, "ana@example.com", "Ana Lopez");
    cli_login(&db_path, "ana@example.com");

    rtc()
        .args(["--db", &db_path, "users", "--reset-code", "boss@example.com"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn test_log_needs_a_supervisor() {
    let db_path = setup_test_db("cli_log_gate");
    cli_init(&db_path);
    cli_register(&db_path, "boss@example.com", "Marta Ruiz");
    cli_register(&db_path, "ana@example.com", "Ana Lopez");

    rtc()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));

    cli_login(&db_path, "ana@example.com");

    rtc()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn test_edit_hides_missing_ids_from_employees() {
    let db_path = signed_in_db("cli_edit_ids");
    promote(&db_path, "ana@example.com", "employee");

    clock(&db_path, &["edit", "999", "--out", "18:00", "-j", "why"], "2025-06-03 09:00")
        .failure()
        .stderr(contains("Permission denied").and(contains("not found").not()));
}

#[test]
fn test_history_page_bounds() {
    let db_path = signed_in_db("cli_history_bounds");

    clock(&db_path, &["in", "-y"], "2025-06-02 09:00").success();
    clock(&db_path, &["out"], "2025-06-02 17:00").success();

    clock(&db_path, &["history", "--page", "9223372036854775807"], "2025-06-03 09:00")
        .success()
        .stdout(contains("No sessions found"));

    clock(&db_path, &["history", "--page-size", "0"], "2025-06-03 09:00").failure();
    clock(&db_path, &["history", "--page-size", "9223372036854775807"], "2025-06-03 09:00")
        .failure();
}

#[test]
fn test_log_records_clock_events() {
    let db_path = signed_in_db("cli_log");

    clock(&db_path, &["in", "-y"], "2025-06-02 09:00").success();

    rtc()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("clock_in")));
}
