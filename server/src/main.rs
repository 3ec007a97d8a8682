use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use common::{config::Config, db::establish_connection};
use customer_server::{routes, AppState};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting the customer service");
    let config = Config::from_env().context("failed to load configuration")?;

    let repository = establish_connection(&config.storage_backend()).await?;
    let app_state = web::Data::new(AppState::new(repository));

    let address = config.server_address();
    info!("Starting HTTP server on {}", address);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(routes::configure)
    })
    .bind(&address)
    .with_context(|| format!("failed to bind {address}"))?
    .run()
    .await?;

    Ok(())
}
