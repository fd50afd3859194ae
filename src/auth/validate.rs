use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppError;

fn re_agenda_filename() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\Aboard_agenda_[\d_]+\.txt\z").unwrap())
}

/// Validate a user id: word characters only, since it names files on disk.
pub fn validate_user_id(user: &str) -> Option<String> {
    if user.is_empty() {
        return Some("User id is required".to_string());
    }
    if !user.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some(format!("User id {user:?} may only contain letters, numbers, and underscores"));
    }
    None
}

/// Validate an agenda filename: `board_agenda_<digits and underscores>.txt`.
pub fn validate_agenda_filename(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("Agenda filename is required".to_string());
    }
    if !re_agenda_filename().is_match(name) {
        return Some(format!("{name:?} is not a board agenda filename"));
    }
    None
}

/// Validate reviewer initials: 1-5 letters.
pub fn validate_initials(initials: &str) -> Option<String> {
    if initials.is_empty() {
        return Some("Initials are required".to_string());
    }
    if initials.len() > 5 {
        return Some("Initials must be at most 5 characters".to_string());
    }
    if !initials.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some("Initials may only contain letters".to_string());
    }
    None
}

/// Turn a validation message into an input error.
pub fn require(problem: Option<String>) -> Result<(), AppError> {
    match problem {
        Some(message) => Err(AppError::InvalidInput(message)),
        None => Ok(()),
    }
}
