use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists: it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250601_0001_create_users",
        description: "Created users, auth_sessions and password_resets tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id            TEXT PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE,
            full_name     TEXT NOT NULL,
            job_title     TEXT,
            role          TEXT NOT NULL DEFAULT 'employee'
                          CHECK(role IN ('employee','supervisor','admin')),
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS auth_sessions (
            token       TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL,
            expires_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS password_resets (
            code        TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL,
            expires_at  TEXT NOT NULL,
            used        INTEGER NOT NULL DEFAULT 0
        );
        "#,
    },
    Migration {
        version: "20250601_0002_create_work_sessions",
        description: "Created work_sessions and breaks tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS work_sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            work_date    TEXT NOT NULL,
            clock_in     TEXT NOT NULL,
            clock_out    TEXT,
            status       TEXT NOT NULL DEFAULT 'active'
                         CHECK(status IN ('active','completed')),
            net_seconds  INTEGER,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_work_sessions_user_date
            ON work_sessions(user_id, work_date);

        CREATE TABLE IF NOT EXISTS breaks (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id       INTEGER NOT NULL REFERENCES work_sessions(id) ON DELETE CASCADE,
            kind             TEXT NOT NULL DEFAULT 'rest'
                             CHECK(kind IN ('meal','rest','personal')),
            started_at       TEXT NOT NULL,
            ended_at         TEXT,
            status           TEXT NOT NULL DEFAULT 'active'
                             CHECK(status IN ('active','ended')),
            duration_seconds INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_breaks_session ON breaks(session_id, status);
        "#,
    },
    Migration {
        version: "20250715_0003_unique_session_per_day",
        description: "One work session per user and day enforced by a unique index",
        sql: r#"
        DROP INDEX IF EXISTS idx_work_sessions_user_date;
        CREATE UNIQUE INDEX IF NOT EXISTS uq_work_sessions_user_date
            ON work_sessions(user_id, work_date);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql))
        .map_err(|e| {
            let _ = conn.execute_batch("ROLLBACK;");
            AppError::Migration(format!("{}: {}", m.version, e))
        })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations, in order.
///
/// Invoked by db::init_db(). Returns how many migrations were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    if applied > 0 {
        success(format!("Applied {} database migration(s).", applied));
    }

    Ok(applied)
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
