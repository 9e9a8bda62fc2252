use actix_web::HttpResponse;

use crate::dto::api::ErrorResponse;
use crate::services::ServiceError;
use crate::source::errors::SourceError;

pub mod api;

/// Maps a service failure onto the JSON error response sent to callers.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorResponse {
        detail: err.to_string(),
    };
    match err {
        ServiceError::NotFound | ServiceError::Source(SourceError::NotFound) => {
            HttpResponse::NotFound().json(body)
        }
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Source(_) => HttpResponse::InternalServerError().json(ErrorResponse {
            detail: "Catalog unavailable".to_string(),
        }),
    }
}
