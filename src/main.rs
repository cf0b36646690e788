// Main entry point - Dependency injection and server setup
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use highscores::application::board_service::{BoardDefaults, BoardService};
use highscores::infrastructure::config::load_server_config;
use highscores::infrastructure::json_file_repository::JsonFileRepository;
use highscores::presentation::app_state::AppState;
use highscores::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_server_config().context("loading configuration")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(JsonFileRepository::new(config.data_dir.clone()));

    // Load or create the board (application layer)
    let board_service = BoardService::open(
        config.board_name.clone(),
        repository,
        BoardDefaults {
            title: config.board_title.clone(),
            description: config.board_description.clone(),
            capacity: config.board_capacity,
        },
    )
    .await
    .with_context(|| format!("opening board '{}'", config.board_name))?;

    let state = Arc::new(AppState { board_service });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Starting highscores service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
