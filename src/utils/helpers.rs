use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::models::contribution::ContributionError;
use crate::services::contributions::Operation;

pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Maps a contract error to its status and public body, logging it on the way.
///
/// Storage failures are logged with the operation and answered with an
/// opaque message; client mistakes are logged as warnings.
pub fn error_reply(operation: Operation, err: &ContributionError) -> (StatusCode, ErrorResponse) {
    match err {
        ContributionError::Database(e) => {
            error!("Database error ({}): {}", operation.as_str(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(operation.failure_message()),
            )
        }
        ContributionError::NotFound { id } => {
            warn!("{} failed: contributor {} not found", operation.as_str(), id);
            (StatusCode::NOT_FOUND, ErrorResponse::new(err.to_string()))
        }
        ContributionError::Validation(_)
        | ContributionError::NoUpdateFields
        | ContributionError::MissingId => {
            warn!("{} rejected: {}", operation.as_str(), err);
            (StatusCode::BAD_REQUEST, ErrorResponse::new(err.to_string()))
        }
    }
}

pub fn error_response(operation: Operation, err: &ContributionError) -> HttpResponse {
    let (status, body) = error_reply(operation, err);
    HttpResponse::build(status).json(body)
}

pub fn allow_header_value(allowed: &[&str]) -> String {
    allowed.join(", ")
}

pub fn method_not_allowed(allowed: &[&str]) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, allow_header_value(allowed)))
        .json(ErrorResponse::new(METHOD_NOT_ALLOWED))
}
