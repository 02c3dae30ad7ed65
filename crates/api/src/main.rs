use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;

mod error;
mod routes;
mod state;

use catalog::config::Settings;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let settings = Settings::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&settings.database_url)
        .await?;

    let state = AppState {
        db,
        page_size: settings.page_size,
    };

    let app = routes::router(state);

    let addr: SocketAddr = settings.api_bind.parse()?;

    info!(%addr, env = %settings.catalog_env, "starting catalog api");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
