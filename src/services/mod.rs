use thiserror::Error;

use crate::source::errors::SourceError;

pub mod catalog;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    Form(String),

    #[error("Type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("Catalog source error: {0}")]
    Source(#[from] SourceError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
