use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

use contribution_tracker::{
    config::AppConfig,
    database::{connection, schema},
    repository::PgContributionStore,
    routes,
    services::contributions::ContributionService,
    telemetry,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let pool = connection::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;
    schema::ensure_schema(&pool)
        .await
        .context("Failed to create contributions table")?;

    let service = ContributionService::new(Arc::new(PgContributionStore::new(pool)));
    let targets = config.targets();
    info!(
        "Goal {} with a per-person target of {}",
        targets.goal_amount, targets.per_person_target
    );

    info!("Server listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::app_config(service.clone()))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
