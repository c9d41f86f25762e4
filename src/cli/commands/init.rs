use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_display = db_path.display().to_string();

    println!("⚙️  Initializing rTimeclock…");

    let conn = Connection::open(&db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    let schema = init_db(&conn)?;

    ttlog_quiet(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_display),
    );

    success(format!("Database initialized at {}", db_display));
    if let Some(v) = schema.version {
        println!("Schema version: {}", v);
    }
    println!("🎉 rTimeclock initialization completed!");
    Ok(())
}
