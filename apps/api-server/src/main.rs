//! # PostPilot API Server
//!
//! The main entry point for the actix-web HTTP server: route setup, shared
//! state, and the lifecycle of the recurring posting scheduler.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod background;
mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting PostPilot API server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config)
        .await
        .map_err(std::io::Error::other)?;

    // Seed one recurring job per auto-posting user, then start the loop.
    let scheduler = state.scheduler.clone();
    if config.scheduler_enabled {
        scheduler.start_all().await;
        scheduler.start().await.map_err(std::io::Error::other)?;
    } else {
        tracing::info!("Scheduler disabled");
    }

    let app_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // Cancel all per-user jobs before exiting.
    if let Err(e) = scheduler.shutdown().await {
        tracing::error!(error = %e, "scheduler shutdown failed");
    }

    Ok(())
}
