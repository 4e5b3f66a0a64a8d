use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

mod app;
mod app_state;
mod config;
mod db;
mod error;
mod middleware;
mod modules;
mod notify;
mod telemetry;

use crate::app_state::AppState;
use crate::notify::{LogMailer, TextReceiptRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let telemetry_handles = telemetry::init_telemetry(None).await?;

    let env = config::init()?.clone();

    let pool = db::init_pool().await.context("Failed to initialize database")?;

    let mailer = Arc::new(LogMailer::from_config(&env.mail));
    let receipts = Arc::new(TextReceiptRenderer);

    let addr = env.server_addr();
    let state = AppState::new(pool, env, mailer, receipts);
    let app = app::create_router(state);

    info!("PG-Manager listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    telemetry_handles.shutdown().await?;

    Ok(())
}
