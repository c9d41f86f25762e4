use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::tracker::Rehydrated;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_time;
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Login { email, password } = cmd {
        let user = app.auth.login(&app.pool, email, password, now)?;
        success(format!("Welcome, {}!", user.first_name()));

        match app.tracker.rehydrate(&app.pool, &user, now.date_naive())? {
            Rehydrated::None => {}
            Rehydrated::Session(s) => {
                info(format!("Work session in progress since {}", format_time(s.clock_in)));
            }
            Rehydrated::SessionOnBreak(s, b) => {
                info(format!(
                    "Work session in progress since {}, on break since {}",
                    format_time(s.clock_in),
                    format_time(b.started_at)
                ));
            }
        }
    }

    Ok(())
}
