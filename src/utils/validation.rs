//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

    regex.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecks {
    pub min_length: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    pub is_valid: bool,
    pub strength: Strength,
    pub score: u8,
    pub checks: PasswordChecks,
}

/// Validate password strength.
///
/// A password is valid with at least 8 characters and one upper-case
/// letter, one lower-case letter and one digit. Special characters only
/// raise the score.
pub fn validate_password(password: &str) -> PasswordCheck {
    let checks = PasswordChecks {
        min_length: password.chars().count() >= MIN_PASSWORD_LEN,
        has_upper: password.chars().any(|c| c.is_ascii_uppercase()),
        has_lower: password.chars().any(|c| c.is_ascii_lowercase()),
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
        has_special: password.chars().any(|c| "!@#$%^&*(),.?\":{}|<>".contains(c)),
    };

    let score = [
        checks.min_length,
        checks.has_upper,
        checks.has_lower,
        checks.has_digit,
        checks.has_special,
    ]
    .iter()
    .filter(|ok| **ok)
    .count() as u8;

    let strength = match score {
        s if s >= 4 => Strength::Strong,
        3 => Strength::Medium,
        _ => Strength::Weak,
    };

    PasswordCheck {
        is_valid: checks.min_length && checks.has_upper && checks.has_lower && checks.has_digit,
        strength,
        score,
        checks,
    }
}
