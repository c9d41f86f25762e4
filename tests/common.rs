#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local};
use rtimeclock::config::Config;
use rtimeclock::core::app::App;
use rtimeclock::db::users;
use rtimeclock::models::role::Role;
use rtimeclock::models::user::NewUser;
use rtimeclock::utils::path::local_storage_file;
use rtimeclock::utils::time::parse_instant;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const PASSWORD: &str = "Secret123";

pub fn rtc() -> Command {
    cargo_bin_cmd!("rtimeclock")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing database or local storage file.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimeclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(local_storage_file(&db_path)).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Local instant from "YYYY-MM-DD" and "HH:MM".
pub fn at(date: &str, time: &str) -> DateTime<Local> {
    parse_instant(&format!("{date} {time}")).expect("valid instant")
}

// ------------------------------------------------
// Library helpers
// ------------------------------------------------

pub fn open_app(db_path: &str) -> App {
    let cfg = Config {
        database: db_path.to_string(),
        ..Config::default()
    };
    App::open(cfg).expect("open app")
}

pub fn new_user(email: &str, name: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        full_name: name.to_string(),
        job_title: None,
    }
}

/// Register `email` (first account of the store becomes admin) and sign in.
pub fn sign_up_and_in(app: &mut App, email: &str, name: &str, now: DateTime<Local>) {
    app.auth
        .register(&app.pool, &new_user(email, name))
        .expect("register");
    app.auth
        .login(&app.pool, email, PASSWORD, now)
        .expect("login");
}

/// Fresh database with one signed-in account of the given role.
pub fn app_with_user(name: &str, role: Role, now: DateTime<Local>) -> App {
    let db = setup_test_db(name);
    let mut app = open_app(&db);
    sign_up_and_in(&mut app, "ana@example.com", "Ana Lopez", now);
    set_role(&mut app, "ana@example.com", role, now);
    app
}

/// Change a role straight in the store, then reload the signed-in profile.
pub fn set_role(app: &mut App, email: &str, role: Role, now: DateTime<Local>) {
    let user = users::find_user_by_email(&app.pool.conn, email)
        .expect("query user")
        .expect("user exists");
    users::set_role(&app.pool.conn, &user.id, role).expect("set role");
    app.auth.init(&app.pool, now).expect("reload profile");
}

// ------------------------------------------------
// CLI helpers
// ------------------------------------------------

pub fn cli_init(db_path: &str) {
    rtc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn cli_register(db_path: &str, email: &str, name: &str) {
    rtc()
        .args([
            "--db", db_path, "register", "--email", email, "--password", PASSWORD, "--name",
            name,
        ])
        .assert()
        .success();
}

pub fn cli_login(db_path: &str, email: &str) {
    rtc()
        .args(["--db", db_path, "login", "--email", email, "--password", PASSWORD])
        .assert()
        .success();
}

/// Change a role straight in the store (CLI tests).
pub fn promote(db_path: &str, email: &str, role: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.execute(
        "UPDATE users SET role = ?1 WHERE email = ?2",
        rusqlite::params![role, email],
    )
    .expect("update role");
}
