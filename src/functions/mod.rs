//! One-request-per-invocation hosting of the contributor contract.
//!
//! Each invocation receives a [`FunctionRequest`], runs it against the shared
//! connection pool and produces a [`FunctionResponse`]. The contract itself
//! lives in [`ContributionService`]; this module only adapts it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::error;

use crate::database::connection::shared_pool;
use crate::models::contribution::ContributionError;
use crate::repository::PgContributionStore;
use crate::services::contributions::{ContributionService, Operation};
use crate::utils::helpers::{ErrorResponse, METHOD_NOT_ALLOWED, allow_header_value, error_reply};

pub mod contributors;

const COLLECTION_PATH: &str = "/api/contributors";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionRequest {
    pub method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub query: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub status: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl FunctionResponse {
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status: status.as_u16(),
                headers: BTreeMap::from([(
                    header::CONTENT_TYPE.to_string(),
                    "application/json".to_string(),
                )]),
                body: Some(value),
            },
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, &ErrorResponse::new(message))
    }

    pub fn failure(operation: Operation, err: &ContributionError) -> Self {
        let (status, body) = error_reply(operation, err);
        Self::json(status, &body)
    }

    pub fn method_not_allowed(allowed: &[&str]) -> Self {
        let mut response = Self::error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED);
        response
            .headers
            .insert(header::ALLOW.to_string(), allow_header_value(allowed));
        response
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl FunctionRequest {
    fn method(&self) -> String {
        self.method.trim().to_ascii_uppercase()
    }

    /// Absent bodies read as an empty object.
    fn payload<T: DeserializeOwned + Default>(&self) -> Result<T, FunctionResponse> {
        match &self.body {
            None | Some(Value::Null) => Ok(T::default()),
            Some(body) => serde_json::from_value(body.clone())
                .map_err(|_| FunctionResponse::error(StatusCode::BAD_REQUEST, "Invalid JSON body")),
        }
    }
}

/// Routes by path the way a function platform maps files to URLs.
pub async fn dispatch(service: &ContributionService, mut request: FunctionRequest) -> FunctionResponse {
    let path = request.path.trim_end_matches('/').to_string();

    if path == COLLECTION_PATH {
        return contributors::index(service, &request).await;
    }

    match path.strip_prefix(COLLECTION_PATH).and_then(|rest| rest.strip_prefix('/')) {
        Some(id) if !id.contains('/') => {
            request
                .query
                .entry("id".to_string())
                .or_insert_with(|| id.to_string());
            contributors::by_id(service, &request).await
        }
        _ => FunctionResponse::error(StatusCode::NOT_FOUND, "Not Found"),
    }
}

/// Entry point for a platform invocation backed by the process-wide pool.
pub async fn invoke(request: FunctionRequest) -> FunctionResponse {
    let pool = match shared_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to acquire connection pool: {}", e);
            return FunctionResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to connect to database",
            );
        }
    };

    let service = ContributionService::new(Arc::new(PgContributionStore::new(pool.clone())));
    dispatch(&service, request).await
}
