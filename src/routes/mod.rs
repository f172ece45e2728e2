use actix_web::web;

use crate::services::contributions::ContributionService;

pub mod api;

/// Everything the server needs, ready for `App::configure`.
pub fn app_config(service: ContributionService) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(service))
            .service(web::scope("/api").configure(api::scoped_config));
    }
}
