use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::calculator::totals::session_totals;
use crate::core::history::{HistoryFilter, HistoryLogic};
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{colorize_in_out, colorize_status};
use crate::utils::date::parse_date;
use crate::utils::formatting::{format_duration, format_optional_time, format_time};
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Local, NaiveDate, Utc};

fn date_arg(value: &Option<String>) -> AppResult<Option<NaiveDate>> {
    value
        .as_deref()
        .map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
        .transpose()
}

pub fn handle(cmd: &Commands, app: &App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::History {
        from,
        to,
        status,
        page,
        page_size,
        user_email,
        export,
        file,
        force,
    } = cmd
    {
        let filter = HistoryFilter {
            from: date_arg(from)?,
            to: date_arg(to)?,
            status: *status,
            page: *page,
            page_size: page_size.unwrap_or(app.cfg.page_size),
            user_email: user_email.clone(),
        };

        if let (Some(format), Some(file)) = (export, file) {
            let sessions = HistoryLogic::all(&app.pool, &app.auth, &filter)?;
            let written = ExportLogic::export(&sessions, *format, file, *force)?;
            if written > 0 {
                success(format!("{} session(s) exported.", written));
            }
            return Ok(());
        }

        let page = HistoryLogic::list(&app.pool, &app.auth, &filter)?;
        let nominal = app.cfg.nominal_workday_seconds();

        header(format!("History of {}", page.user.full_name));

        if page.rows.is_empty() {
            info("No sessions found for the selected filters.");
            return Ok(());
        }

        let sep = app.cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(vec![
            Column::new("ID", 5),
            Column::new("Date", 10),
            Column::new("In", 5),
            Column::new("Out", 5),
            Column::new("Status", 9),
            Column::new("Breaks", 6),
            Column::new("Net", 8),
        ])
        .with_separator(sep);

        for s in &page.rows {
            let totals = session_totals(s, now.with_timezone(&Utc), nominal);
            let net = s.net_seconds.unwrap_or(totals.net_seconds);

            table.add_row(vec![
                s.id.to_string(),
                s.work_date.format("%Y-%m-%d").to_string(),
                colorize_in_out(&format_time(s.clock_in), true),
                colorize_in_out(&format_optional_time(s.clock_out), false),
                colorize_status(s.is_active(), s.status.to_db_str()),
                s.breaks.len().to_string(),
                format_duration(net),
            ]);
        }

        print!("{}", table.render());

        let p = page.pagination;
        println!(
            "\nPage {} of {} ({} session(s), {} per page)",
            p.page, p.total_pages, p.total, p.page_size
        );
    }

    Ok(())
}
