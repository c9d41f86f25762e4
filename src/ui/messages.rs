//! User-facing notifications: one coloured icon per severity, errors on stderr.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn colour(self) -> &'static str {
        match self {
            Level::Info => "\x1b[34m",
            Level::Success => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }
}

pub fn notify<T: fmt::Display>(level: Level, msg: T) {
    let line = format!("{}{}{} {}{}", level.colour(), BOLD, level.icon(), RESET, msg);
    match level {
        Level::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    notify(Level::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    notify(Level::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    notify(Level::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    notify(Level::Error, msg);
}

/// Section header of the report and history views.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}=== {} ==={}", Level::Info.colour(), BOLD, msg, RESET);
}
