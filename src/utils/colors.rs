/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Overtime color: >0 → green, 0 → reset
pub fn color_for_overtime(seconds: i64) -> &'static str {
    if seconds > 0 { GREEN } else { RESET }
}

/// Grey out empty placeholders ("--:--", "0m").
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "0m" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize_status(active: bool, label: &str) -> String {
    if active {
        format!("{YELLOW}{label}{RESET}")
    } else {
        format!("{GREEN}{label}{RESET}")
    }
}

pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if value.trim() == "--:--" {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

pub fn cyan(value: &str) -> String {
    format!("{CYAN}{value}{RESET}")
}
