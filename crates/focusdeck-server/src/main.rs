use std::sync::Arc;

use focusdeck_server::{error::ServerError, routes, state::AppState};

use focusdeck_core::storage::data_dir;
use focusdeck_core::{Config, Database};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let db_path = match &config.server.db_path {
        Some(path) => path.clone(),
        None => data_dir()?.join("focusdeck.db"),
    };
    info!(path = %db_path.display(), "opening record store");
    let db = Database::open_at(&db_path)?;

    let state = Arc::new(AppState::new(db));
    let app = routes::router(state);

    info!("listening on {}", config.server.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
