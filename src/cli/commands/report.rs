use crate::cli::parser::{Commands, ReportPeriod};
use crate::core::app::App;
use crate::core::reports::{DailyReport, MonthlyReport, ReportLogic, WeeklyReport};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_overtime, colorize_in_out, colorize_optional};
use crate::utils::date::{parse_date, weekday_short};
use crate::utils::formatting::{
    format_date, format_duration, format_duration_human, format_optional_time, format_time,
};
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Local, NaiveDate};

fn parse_opt_date(value: &Option<String>) -> AppResult<Option<NaiveDate>> {
    value
        .as_deref()
        .map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
        .transpose()
}

fn print_overtime(seconds: i64) {
    println!(
        "Overtime      : {}{}{}",
        color_for_overtime(seconds),
        format_duration_human(seconds),
        RESET
    );
}

fn print_daily(r: &DailyReport) {
    header(format!("Daily report: {}", format_date(r.date)));

    if !r.worked {
        info("No work session recorded for this day.");
        return;
    }

    println!(
        "Clock in      : {}",
        colorize_in_out(&format_optional_time(r.clock_in), true)
    );
    println!(
        "Clock out     : {}",
        colorize_in_out(&format_optional_time(r.clock_out), false)
    );
    println!(
        "Status        : {}",
        r.status.map(|s| s.to_db_str()).unwrap_or_default()
    );
    println!("Total         : {}", format_duration(r.totals.total_seconds));
    println!("Breaks        : {}", format_duration(r.totals.break_seconds));
    println!("Net           : {}", format_duration(r.totals.net_seconds));
    print_overtime(r.totals.overtime_seconds);

    if !r.breaks.is_empty() {
        println!();
        let mut table = Table::new(vec![
            Column::new("Kind", 10),
            Column::new("Start", 6),
            Column::new("End", 6),
            Column::new("Duration", 10),
        ]);
        for b in r.breaks.iter().rev() {
            table.add_row(vec![
                b.kind.to_db_str().to_string(),
                format_time(b.started_at),
                colorize_optional(&format_optional_time(b.ended_at)),
                b.duration_seconds
                    .map(format_duration_human)
                    .unwrap_or_else(|| "running".to_string()),
            ]);
        }
        print!("{}", table.render());
    }
}

fn print_totals(net: i64, breaks: i64, overtime: i64, days: i64, average: i64) {
    println!("Days worked   : {}", days);
    println!("Net           : {}", format_duration_human(net));
    println!("Breaks        : {}", format_duration_human(breaks));
    print_overtime(overtime);
    println!("Daily average : {}", format_duration_human(average));
}

fn print_weekly(r: &WeeklyReport) {
    header(format!(
        "Weekly report: {} → {}",
        format_date(r.start),
        format_date(r.end)
    ));
    print_totals(
        r.total_net_seconds,
        r.total_break_seconds,
        r.total_overtime_seconds,
        r.days_worked,
        r.average_daily_seconds,
    );

    if r.daily.is_empty() {
        return;
    }

    println!();
    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Day", 4),
        Column::new("Net", 8),
        Column::new("Breaks", 8),
    ]);
    for d in &r.daily {
        table.add_row(vec![
            d.date.format("%Y-%m-%d").to_string(),
            weekday_short(d.date).to_string(),
            format_duration_human(d.net_seconds),
            colorize_optional(&format_duration_human(d.break_seconds)),
        ]);
    }
    print!("{}", table.render());
}

fn print_monthly(r: &MonthlyReport) {
    header(format!("Monthly report: {:02}/{}", r.month, r.year));
    print_totals(
        r.total_net_seconds,
        r.total_break_seconds,
        r.total_overtime_seconds,
        r.days_worked,
        r.average_daily_seconds,
    );

    if r.weekly.is_empty() {
        return;
    }

    println!();
    let mut table = Table::new(vec![
        Column::new("Week", 5),
        Column::new("Days", 5),
        Column::new("Net", 10),
    ]);
    for w in &r.weekly {
        table.add_row(vec![
            w.week.to_string(),
            w.days.to_string(),
            format_duration_human(w.total_seconds),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(cmd: &Commands, app: &App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Report { period } = cmd {
        let user = app.auth.require_user()?;
        let nominal = app.cfg.nominal_workday_seconds();
        let today = now.date_naive();

        match period {
            ReportPeriod::Daily { date } => {
                let date = parse_opt_date(date)?.unwrap_or(today);
                let r = ReportLogic::daily(&app.pool, user, date, now, nominal)?;
                print_daily(&r);
            }
            ReportPeriod::Weekly { start } => {
                let start = parse_opt_date(start)?;
                let r = ReportLogic::weekly(&app.pool, user, start, today, nominal)?;
                print_weekly(&r);
            }
            ReportPeriod::Monthly { month, year } => {
                let r = ReportLogic::monthly(&app.pool, user, *month, *year, today, nominal)?;
                print_monthly(&r);
            }
        }
    }

    Ok(())
}
