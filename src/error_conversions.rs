//! Error conversion glue between the domain layer and the outer layers.
//!
//! The domain layer must not depend on source or service error types.

use crate::domain::types::TypeConstraintError;
use crate::source::errors::SourceError;

#[cfg(feature = "server")]
impl From<TypeConstraintError> for crate::services::ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        crate::services::ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for SourceError {
    fn from(val: TypeConstraintError) -> Self {
        SourceError::ValidationError(val.to_string())
    }
}
