//! Store-side auth primitives: user profiles, sign-in sessions and reset codes.

use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{AuthSession, ProfileUpdate, User};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const USER_COLUMNS: &str = "id, email, full_name, job_title, role, created_at";

pub fn map_user_row(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        full_name: row.get("full_name")?,
        job_title: row.get("job_title")?,
        role,
        created_at: row.get("created_at")?,
    })
}

pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

pub fn insert_user(conn: &Connection, user: &User, password_hash: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, email, full_name, job_title, role, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.id,
            user.email,
            user.full_name,
            user.job_title,
            user.role.to_db_str(),
            password_hash,
            user.created_at,
        ],
    )?;
    Ok(())
}

pub fn find_user_by_id(conn: &Connection, id: &str) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_user_row).optional()?)
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 COLLATE NOCASE");
    Ok(conn.query_row(&sql, [email], map_user_row).optional()?)
}

/// Profile plus stored password hash, for sign-in.
pub fn find_credentials(conn: &Connection, email: &str) -> AppResult<Option<(User, String)>> {
    let sql = format!(
        "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = ?1 COLLATE NOCASE"
    );
    let found = conn
        .query_row(&sql, [email], |row| {
            Ok((map_user_row(row)?, row.get::<_, String>("password_hash")?))
        })
        .optional()?;
    Ok(found)
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY full_name ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_profile(conn: &Connection, user_id: &str, update: &ProfileUpdate) -> AppResult<User> {
    conn.execute(
        "UPDATE users
         SET full_name = COALESCE(?1, full_name),
             job_title = COALESCE(?2, job_title)
         WHERE id = ?3",
        params![update.full_name, update.job_title, user_id],
    )?;

    find_user_by_id(conn, user_id)?.ok_or_else(|| AppError::UserNotFound(user_id.to_string()))
}

pub fn update_password_hash(conn: &Connection, user_id: &str, hash: &str) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE users SET password_hash = ?1 WHERE id = ?2",
        params![hash, user_id],
    )?;
    if changed == 0 {
        return Err(AppError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}

pub fn set_role(conn: &Connection, user_id: &str, role: Role) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET role = ?1 WHERE id = ?2",
        params![role.to_db_str(), user_id],
    )?;
    Ok(())
}

// ------------------------------------------------
// Sign-in sessions
// ------------------------------------------------

fn map_auth_session(row: &Row) -> Result<AuthSession> {
    Ok(AuthSession {
        token: row.get("token")?,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
        expires_at: row.get("expires_at")?,
    })
}

pub fn insert_auth_session(conn: &Connection, s: &AuthSession) -> AppResult<()> {
    conn.execute(
        "INSERT INTO auth_sessions (token, user_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![s.token, s.user_id, s.created_at, s.expires_at],
    )?;
    Ok(())
}

/// A stored sign-in session that has not expired at `now`.
pub fn find_auth_session(
    conn: &Connection,
    token: &str,
    now: DateTime<Utc>,
) -> AppResult<Option<AuthSession>> {
    let found = conn
        .query_row(
            "SELECT token, user_id, created_at, expires_at FROM auth_sessions WHERE token = ?1",
            [token],
            map_auth_session,
        )
        .optional()?;

    Ok(found.filter(|s| {
        crate::utils::time::from_db_instant(&s.expires_at)
            .map(|exp| exp > now)
            .unwrap_or(false)
    }))
}

pub fn delete_auth_session(conn: &Connection, token: &str) -> AppResult<()> {
    conn.execute("DELETE FROM auth_sessions WHERE token = ?1", [token])?;
    Ok(())
}

pub fn delete_auth_sessions_for(conn: &Connection, user_id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM auth_sessions WHERE user_id = ?1", [user_id])?;
    Ok(())
}

// ------------------------------------------------
// Password reset codes
// ------------------------------------------------

pub fn insert_reset_code(
    conn: &Connection,
    code: &str,
    user_id: &str,
    created_at: &str,
    expires_at: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO password_resets (code, user_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![code, user_id, created_at, expires_at],
    )?;
    Ok(())
}

/// Consume a reset code: returns the owning user id when the code exists,
/// is unused and has not expired. The code is marked used.
pub fn take_reset_code(conn: &Connection, code: &str, now: DateTime<Utc>) -> AppResult<Option<String>> {
    let found: Option<(String, String, i64)> = conn
        .query_row(
            "SELECT user_id, expires_at, used FROM password_resets WHERE code = ?1",
            [code],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    let Some((user_id, expires_at, used)) = found else {
        return Ok(None);
    };

    let expired = crate::utils::time::from_db_instant(&expires_at)
        .map(|exp| exp <= now)
        .unwrap_or(true);

    if used != 0 || expired {
        return Ok(None);
    }

    conn.execute("UPDATE password_resets SET used = 1 WHERE code = ?1", [code])?;
    Ok(Some(user_id))
}
