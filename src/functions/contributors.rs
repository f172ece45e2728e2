use actix_web::http::StatusCode;

use super::{FunctionRequest, FunctionResponse};
use crate::requests::contribution::{CreateContributionRequest, UpdateContributionRequest};
use crate::services::contributions::{ContributionService, Operation};

/// `/api/contributors`: list and create.
pub async fn index(service: &ContributionService, request: &FunctionRequest) -> FunctionResponse {
    match request.method().as_str() {
        "GET" => match service.list().await {
            Ok(contributors) => FunctionResponse::json(StatusCode::OK, &contributors),
            Err(e) => FunctionResponse::failure(Operation::List, &e),
        },
        "POST" => {
            let payload = match request.payload::<CreateContributionRequest>() {
                Ok(payload) => payload,
                Err(response) => return response,
            };
            match service.create(payload).await {
                Ok(contributor) => FunctionResponse::json(StatusCode::CREATED, &contributor),
                Err(e) => FunctionResponse::failure(Operation::Create, &e),
            }
        }
        _ => FunctionResponse::method_not_allowed(&["GET", "POST"]),
    }
}

/// `/api/contributors/{id}`: partial update and delete.
pub async fn by_id(service: &ContributionService, request: &FunctionRequest) -> FunctionResponse {
    let id = match request.query.get("id").map(|id| id.trim()) {
        Some(id) if !id.is_empty() => id,
        _ => return FunctionResponse::error(StatusCode::BAD_REQUEST, "Missing contributor id"),
    };

    match request.method().as_str() {
        "PATCH" => {
            let payload = match request.payload::<UpdateContributionRequest>() {
                Ok(payload) => payload,
                Err(response) => return response,
            };
            match service.update(id, payload).await {
                Ok(contributor) => FunctionResponse::json(StatusCode::OK, &contributor),
                Err(e) => FunctionResponse::failure(Operation::Update, &e),
            }
        }
        "DELETE" => match service.delete(id).await {
            Ok(()) => FunctionResponse::empty(StatusCode::NO_CONTENT),
            Err(e) => FunctionResponse::failure(Operation::Delete, &e),
        },
        _ => FunctionResponse::method_not_allowed(&["PATCH", "DELETE"]),
    }
}
