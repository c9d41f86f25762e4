use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::history::{HistoryLogic, SessionEdit};
use crate::db::queries::load_session;
use crate::errors::{AppError, AppResult};
use crate::models::role::Access;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{format_duration, format_optional_time, format_time};
use crate::utils::time::{local_instant, parse_time};
use chrono::{DateTime, NaiveDate, Utc};

/// "HH:MM" on the session's own date, as a UTC instant.
fn time_on(date: NaiveDate, value: &Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    match value {
        Some(v) => {
            let t = parse_time(v).ok_or_else(|| AppError::InvalidTime(v.clone()))?;
            Ok(Some(local_instant(date, t)?.with_timezone(&Utc)))
        }
        None => Ok(None),
    }
}

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Edit {
        id,
        clock_in,
        clock_out,
        status,
        justification,
    } = cmd
    {
        // same answer for missing and existing ids when the role cannot edit
        app.auth
            .require_role(Access::Supervisor, "you are not allowed to edit records")?;

        let current = load_session(&app.pool.conn, *id)?.ok_or(AppError::SessionNotFound(*id))?;

        let edit = SessionEdit {
            clock_in: time_on(current.work_date, clock_in)?,
            clock_out: time_on(current.work_date, clock_out)?,
            status: *status,
        };

        if edit.is_empty() {
            info("Nothing to change: pass --in, --out or --status.");
            return Ok(());
        }

        let updated = HistoryLogic::edit(&app.pool, &app.auth, *id, &edit, justification)?;

        success(format!("Session {} updated.", updated.id));
        println!(
            "{}  {} → {}  [{}]  net {}",
            updated.work_date,
            format_time(updated.clock_in),
            format_optional_time(updated.clock_out),
            updated.status.to_db_str(),
            updated
                .net_seconds
                .map(format_duration)
                .unwrap_or_else(|| "--:--:--".to_string())
        );
    }

    Ok(())
}
