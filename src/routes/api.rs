use actix_web::{HttpResponse, error::InternalError, web};
use tracing::warn;

use crate::handlers;
use crate::utils::helpers::{ErrorResponse, method_not_allowed};

const COLLECTION_METHODS: &[&str] = &["GET", "POST"];
const ITEM_METHODS: &[&str] = &["PATCH", "DELETE"];

/// Malformed or missing JSON bodies get the same `{"error": ...}` shape as
/// every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::new("Invalid JSON body")),
        )
        .into()
    })
}

pub fn scoped_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::resource("/health").route(web::get().to(handlers::health::check)))
        .service(
            web::resource("/contributors")
                .route(web::get().to(handlers::contributions::all))
                .route(web::post().to(handlers::contributions::create))
                .default_service(
                    web::route().to(|| async { method_not_allowed(COLLECTION_METHODS) }),
                ),
        )
        .service(
            web::resource("/contributors/{id}")
                .route(web::patch().to(handlers::contributions::update))
                .route(web::delete().to(handlers::contributions::delete))
                .default_service(web::route().to(|| async { method_not_allowed(ITEM_METHODS) })),
        );
}
