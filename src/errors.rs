//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors (no store call is made)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error(
        "Password must be at least 8 characters long and include upper-case letters, lower-case letters and digits"
    )]
    WeakPassword,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Authentication / authorization
    // ---------------------------
    #[error("Not signed in: run `rtimeclock login` first")]
    NotAuthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with email {0} already exists")]
    EmailTaken(String),

    #[error("Invalid or expired reset code")]
    InvalidResetCode,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    // ---------------------------
    // Work session / break preconditions
    // ---------------------------
    #[error("You already have an active work session for today")]
    SessionAlreadyActive,

    #[error("You have already registered a work session for today: only one session per day is allowed")]
    SessionAlreadyCompleted,

    #[error("No active work session")]
    NoActiveSession,

    #[error("A break is already in progress")]
    BreakAlreadyActive,

    #[error("No break in progress")]
    NoActiveBreak,

    #[error("Work session {0} not found")]
    SessionNotFound(i64),

    #[error("A justification is required to edit a record")]
    MissingJustification,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures raised by the store itself rather than by
    /// validation or a violated precondition.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            AppError::Db(_)
                | AppError::Io(_)
                | AppError::Json(_)
                | AppError::Csv(_)
                | AppError::Migration(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
