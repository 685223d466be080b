mod config;
mod controllers;
mod datasource;
mod models;
mod routes;
mod services;
mod utils;
mod views;

use clap::Parser;
use config::loader::{Cli, Config};
use routes::router::AppState;
use services::control::Controls;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::new(Cli::parse());

    let storage = datasource::fs::init_fs(&config)?;

    let app = routes::router::create_routes(
        AppState {
            storage: storage.clone(),
        },
        config.body_limit,
    );

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    let share_url = utils::net::share_url(listener.local_addr()?);
    tracing::info!("listening on {}", addr);
    tracing::info!("upload page available at {}", share_url);
    tracing::info!("storing files in {}", storage.path().display());

    let shutdown = CancellationToken::new();

    if config.controls {
        let controls = Controls::new(storage, config.settings_file.clone(), share_url);
        tokio::spawn(controls.run(shutdown.clone()));
    }

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, shutting down");
            ctrl_c.cancel();
        }
    });

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { server_shutdown.cancelled().await })
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
