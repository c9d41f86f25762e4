use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::{format_duration_human, format_time};
use chrono::{DateTime, Local};

/// `pause`: start a break.
pub fn handle_pause(cmd: &Commands, app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Pause { kind } = cmd {
        let kind = kind.unwrap_or_else(|| app.cfg.break_kind());
        let b = app.tracker.start_break(&app.pool, kind, now)?;

        success(format!(
            "{} break started at {}.",
            b.kind.to_db_str(),
            format_time(b.started_at)
        ));
    }

    Ok(())
}

/// `resume`: end the current break.
pub fn handle_resume(app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    let b = app.tracker.end_break(&app.pool, now)?;

    success(format!(
        "Break ended after {}. Back to work!",
        format_duration_human(b.duration_seconds.unwrap_or_default())
    ));

    Ok(())
}
