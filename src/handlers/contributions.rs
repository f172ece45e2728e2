use actix_web::{HttpResponse, Result, web};
use tracing::info;

use crate::{
    requests::contribution::{CreateContributionRequest, UpdateContributionRequest},
    services::contributions::{ContributionService, Operation},
    utils::helpers::error_response,
};

pub async fn all(service: web::Data<ContributionService>) -> Result<HttpResponse> {
    info!("Getting all contributors");

    match service.list().await {
        Ok(contributors) => Ok(HttpResponse::Ok().json(contributors)),
        Err(e) => Ok(error_response(Operation::List, &e)),
    }
}

pub async fn create(
    service: web::Data<ContributionService>,
    request: web::Json<CreateContributionRequest>,
) -> Result<HttpResponse> {
    info!("Creating contributor");

    match service.create(request.into_inner()).await {
        Ok(contributor) => Ok(HttpResponse::Created().json(contributor)),
        Err(e) => Ok(error_response(Operation::Create, &e)),
    }
}

pub async fn update(
    service: web::Data<ContributionService>,
    path: web::Path<String>,
    request: web::Json<UpdateContributionRequest>,
) -> Result<HttpResponse> {
    let contributor_id = path.into_inner();
    info!("Updating contributor {}", contributor_id);

    match service.update(&contributor_id, request.into_inner()).await {
        Ok(contributor) => Ok(HttpResponse::Ok().json(contributor)),
        Err(e) => Ok(error_response(Operation::Update, &e)),
    }
}

pub async fn delete(
    service: web::Data<ContributionService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let contributor_id = path.into_inner();
    info!("Deleting contributor {}", contributor_id);

    match service.delete(&contributor_id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(error_response(Operation::Delete, &e)),
    }
}
