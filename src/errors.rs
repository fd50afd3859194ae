use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    InvalidInput(String),
    Vcs(String),
    CommitFailed(String),
    Lookup(String),
    Unauthorized,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "IO error: {e}"),
            AppError::Yaml(e) => write!(f, "YAML error: {e}"),
            AppError::InvalidInput(e) => write!(f, "Invalid input: {e}"),
            AppError::Vcs(e) => write!(f, "Version control error: {e}"),
            AppError::CommitFailed(output) => write!(f, "{output}"),
            AppError::Lookup(e) => write!(f, "Lookup error: {e}"),
            AppError::Unauthorized => write!(f, "Not logged in"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::InvalidInput(_)
            | AppError::Unauthorized
            | AppError::NotFound
            | AppError::CommitFailed(_) => serde_json::json!({ "error": self.to_string() }),
            _ => {
                log::error!("{self}");
                serde_json::json!({ "error": "Internal Server Error" })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            log::debug!("{e}");
            AppError::NotFound
        } else {
            AppError::Io(e)
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Yaml(e)
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Io(std::io::Error::other(e.to_string()))
    }
}
