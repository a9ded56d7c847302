//! Password policy applied on registration and password change.

use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Returns `true` when the password is at least [`MIN_PASSWORD_LENGTH`]
/// characters, consists only of ASCII letters and digits, and contains at
/// least one of each.
#[must_use]
pub fn is_valid(password: &str) -> bool {
    // `regex` has no look-around, letter and digit are checked separately
    Regex::new(r"^[A-Za-z0-9]{8,}$").is_ok_and(|re| re.is_match(password))
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}
