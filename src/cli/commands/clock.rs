use crate::cli::commands::status::{live_display, watch};
use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::tracker::ClockIn;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use crate::utils::formatting::{format_duration_human, format_time};
use chrono::{DateTime, Local};

/// `in`: start today's session.
pub fn handle_in(cmd: &Commands, app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::In { yes, watch: watching } = cmd {
        let user = app.auth.require_user()?.clone();

        if *watching {
            app.tracker.set_display(live_display());
        }

        let outcome = app
            .tracker
            .start_session(&app.pool, &user, now, |notice| *yes || ask_confirmation(notice))?;

        match outcome {
            ClockIn::Cancelled => info("Clock-in cancelled."),
            ClockIn::Started(session) => {
                success(format!(
                    "Work session started at {}. Have a good day, {}!",
                    format_time(session.clock_in),
                    user.first_name()
                ));
                if *watching {
                    watch(None);
                }
            }
        }
    }

    Ok(())
}

/// `out`: complete today's session, ending an open break first.
pub fn handle_out(app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    let had_break = app.tracker.status().has_active_break;
    let session = app.tracker.end_session(&app.pool, now)?;

    if had_break {
        info("The open break was ended.");
    }

    let net = session.net_seconds.unwrap_or_default();
    success(format!(
        "Work session completed at {}. Net time: {}",
        session.clock_out.map(format_time).unwrap_or_default(),
        format_duration_human(net)
    ));

    Ok(())
}
