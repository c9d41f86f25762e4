use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Meal,
    Rest,
    Personal,
}

impl BreakKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BreakKind::Meal => "meal",
            BreakKind::Rest => "rest",
            BreakKind::Personal => "personal",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "meal" => Some(BreakKind::Meal),
            "rest" => Some(BreakKind::Rest),
            "personal" => Some(BreakKind::Personal),
            _ => None,
        }
    }

    /// Helper: convert input code from config (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        BreakKind::from_db_str(&code.to_lowercase())
    }
}
