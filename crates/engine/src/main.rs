//! TasteRank Service - Personalized Recommendation Serving
//!
//! Port: 8082
//! Loads the trained model artifact at startup and refuses to start without
//! a valid one; serving is read-only against the published model bundle.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tasterank_core::config::{load_dotenv, ConfigLoader};
use tasterank_engine::{load_artifact, server, AppState, ModelState, ServiceConfig, ServingModel};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .json()
        .init();

    info!("Starting TasteRank service");

    let config = ServiceConfig::from_env()?;
    config.validate()?;

    let (store, model) = load_artifact(&config.model_path)
        .context("refusing to start serving without a valid model artifact")?;
    info!(
        users = store.n_users(),
        items = store.n_items(),
        factors = model.factor_count(),
        "Model artifact loaded"
    );

    let state = web::Data::new(AppState {
        models: Arc::new(ModelState::new(ServingModel { store, model })),
        config: config.clone(),
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    info!("TasteRank service listening on {}", bind_addr);

    let mut http_server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/health", web::get().to(server::health_check))
            .configure(server::configure_routes)
    });
    if let Some(workers) = config.workers {
        http_server = http_server.workers(workers);
    }
    http_server.bind(&bind_addr)?.run().await?;

    Ok(())
}
