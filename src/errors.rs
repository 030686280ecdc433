use astra::Response;
use std::fmt;

/// Errors originating from either the server logic
/// (routing, missing resources, validation) or downstream layers (DB, files).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Unauthorized(String),
    DbError(String),
    XlsxError(String),
    UploadError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::UploadError(_) => 400,
            ServerError::DbError(_) | ServerError::XlsxError(_) | ServerError::InternalError => 500,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::UploadError(msg) => write!(f, "Upload Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}
