use actix_session::Session;

use crate::commit::Credentials;
use crate::errors::AppError;

pub fn get_username(session: &Session) -> Result<String, AppError> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err(AppError::Unauthorized),
        Err(e) => {
            log::warn!("Session error: {e}");
            Err(AppError::Unauthorized)
        }
    }
}

/// VCS credentials for the logged-in member, when the session carries a password.
pub fn get_credentials(session: &Session) -> Option<Credentials> {
    let username = session.get::<String>("username").unwrap_or(None)?;
    let password = session.get::<String>("password").unwrap_or(None)?;
    Some(Credentials { username, password })
}
