use std::net::SocketAddr;

use tracing::{info, Level};

use bookshelf_backend::{config::AppConfig, create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; real environment variables win.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::from_env();
    info!(database_url = %config.database_url, "starting {}", config.app_name);

    let state = initialize_backend(config.clone()).await?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
