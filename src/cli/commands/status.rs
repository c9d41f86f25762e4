use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::state::TrackingState;
use crate::core::tracker::{Display, TodayStats};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_overtime, colorize_status, cyan, RESET};
use crate::utils::formatting::{format_duration, format_duration_human, format_optional_time, format_time};
use crate::utils::time::calculate_duration;
use chrono::{DateTime, Local, Utc};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One status line, rewritten in place on every tick.
fn render_clock(state: &TrackingState, now: DateTime<Utc>) {
    let Some(session) = &state.session else {
        return;
    };

    let elapsed = format_duration(calculate_duration(session.clock_in, now));
    let line = match &state.open_break {
        Some(b) => format!(
            "⏱  {}   ☕ {} break {}",
            elapsed,
            b.kind.to_db_str(),
            format_duration(calculate_duration(b.started_at, now))
        ),
        None => format!("⏱  {}", elapsed),
    };

    print!("\r{}   ", line);
    let _ = io::stdout().flush();
}

pub fn live_display() -> Display {
    Arc::new(render_clock)
}

/// Block while the ticker draws; forever when `seconds` is `None`.
pub fn watch(seconds: Option<u64>) {
    match seconds {
        Some(s) => thread::sleep(Duration::from_secs(s)),
        None => loop {
            thread::park();
        },
    }
    println!();
}

fn print_today(stats: &TodayStats) {
    header("Today");

    let Some(session) = &stats.session else {
        info("No work session today. Clock in with `rtimeclock in`.");
        return;
    };

    let state = if stats.on_break {
        colorize_status(true, "on break")
    } else if stats.is_active {
        colorize_status(true, "working")
    } else {
        colorize_status(false, "completed")
    };

    let t = &stats.totals;
    println!("Status    : {}", state);
    println!("Clock in  : {}", format_time(session.clock_in));
    println!("Clock out : {}", format_optional_time(session.clock_out));
    println!("Total     : {}", format_duration(t.total_seconds));
    println!("Breaks    : {} ({})", format_duration(t.break_seconds), session.breaks.len());
    println!("Net       : {}", cyan(&format_duration(t.net_seconds)));
    println!(
        "Overtime  : {}{}{}",
        color_for_overtime(t.overtime_seconds),
        format_duration_human(t.overtime_seconds),
        RESET
    );
}

pub fn handle(cmd: &Commands, app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Status {
        watch: watching,
        watch_for,
        json,
    } = cmd
    {
        let user = app.auth.require_user()?.clone();
        let stats = app.tracker.today_stats(&app.pool, &user, now)?;

        if *json {
            let out = json!({
                "status": app.tracker.status(),
                "today": stats,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        print_today(&stats);

        if *watching {
            if !stats.is_active {
                info("Nothing to watch: no session in progress.");
                return Ok(());
            }
            app.tracker.set_display(live_display());
            app.tracker.rehydrate(&app.pool, &user, now.date_naive())?;
            watch(*watch_for);
        }
    }

    Ok(())
}
