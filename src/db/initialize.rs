use crate::db::migrate::{applied_versions, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Schema state after initialization.
#[derive(Debug, Clone)]
pub struct SchemaInfo {
    /// Migrations applied by this call.
    pub applied_now: usize,
    /// Latest applied version, if any.
    pub version: Option<String>,
}

/// Bring the schema up to date.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<SchemaInfo> {
    let applied_now = run_pending_migrations(conn)?;
    let version = applied_versions(conn)?.pop();
    Ok(SchemaInfo {
        applied_now,
        version,
    })
}
