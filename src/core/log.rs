use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const OP_WIDTH_LIMIT: usize = 60;

/// ANSI colour per operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" | "register" | "login" => Colour::Green,
        "clock_out" | "logout" => Colour::Cyan,
        "break_start" | "break_end" => Colour::Blue,
        "del" | "login_failed" | "store_error" => Colour::Red,
        "edit" | "role" | "password_reset" | "password_reset_code" | "password_update"
        | "profile" => Colour::Yellow,
        "password_reset_request" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

fn truncate(visible: &str) -> String {
    if visible.chars().count() > OP_WIDTH_LIMIT {
        let mut s = visible.chars().take(OP_WIDTH_LIMIT - 3).collect::<String>();
        s.push_str("...");
        s
    } else {
        visible.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the internal log, oldest first; `operation` narrows it down.
    pub fn print_log(pool: &DbPool, operation: Option<&str>) -> AppResult<()> {
        let mut entries = load_log(&pool.conn, operation)?;
        entries.reverse();

        if entries.is_empty() {
            info("The log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);

                // single op+target column
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };

                (e.id, date, e.operation, op_target, e.message)
            })
            .collect();

        let op_w = rows
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_LIMIT);
        let id_w = rows
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(0);

        println!("📜 Internal log:\n");

        for (id, date, operation, op_target, message) in rows {
            let color = color_for_operation(&operation);

            // only the operation word is coloured
            let visible = truncate(&op_target);
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
