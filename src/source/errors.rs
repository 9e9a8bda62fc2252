use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Entity not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Http(String),

    #[error("Unexpected status code: {0}")]
    Status(u16),

    #[error("Decoding error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SourceError::Status(status.as_u16())
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}

#[cfg(feature = "client")]
impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::ValidationError(format!("Invalid URL: {err}"))
    }
}
